/**
 * Form State
 * Drafts, slug derivation and client-side validation for the admin forms
 */
pub mod blog;
pub mod contact;
pub mod portfolio;
pub mod product;
pub mod review;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::time::Duration;

use crate::catalog::slug::{is_valid_slug, slugify};
use crate::client::{ApiClient, CatalogEntity};
use crate::error::{AdminError, Result};

pub use blog::BlogDraft;
pub use contact::ContactDraft;
pub use portfolio::PortfolioDraft;
pub use product::ProductDraft;
pub use review::ReviewDraft;

lazy_static::lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

// ============================================================================
// Validation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// One or more field errors; blocks submission before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn first_message(&self) -> &str {
        self.errors
            .first()
            .map(|e| e.message.as_str())
            .unwrap_or("Invalid input")
    }

    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.first_message())
    }
}

impl std::error::Error for ValidationError {}

/// Collects field errors in form order.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required and at least `min` characters (after trimming).
    pub fn text(&mut self, field: &'static str, label: &str, value: &str, min: usize) -> &mut Self {
        let len = value.trim().chars().count();
        if len == 0 {
            self.fail(field, format!("{} is required", label));
        } else if len < min {
            self.fail(
                field,
                format!("{} must be at least {} characters long", label, min),
            );
        }
        self
    }

    pub fn slug(&mut self, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail("slug", "Slug is required");
        } else if !is_valid_slug(value) {
            self.fail(
                "slug",
                "Slug can only contain lowercase letters, numbers, hyphens and underscores",
            );
        }
        self
    }

    pub fn email(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, "Email is required");
        } else if !is_valid_email(value) {
            self.fail(field, "Please enter a valid email address");
        }
        self
    }

    pub fn check(&mut self, ok: bool, field: &'static str, message: &str) -> &mut Self {
        if !ok {
            self.fail(field, message);
        }
        self
    }

    fn fail(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn finish(&mut self) -> std::result::Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(std::mem::take(&mut self.errors)))
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Trim entries, drop blanks and case-insensitive duplicates, keep first spelling.
pub fn normalize_list(values: &mut Vec<String>) {
    let mut seen: Vec<String> = Vec::with_capacity(values.len());
    values.retain_mut(|v| {
        *v = v.trim().to_string();
        let lower = v.to_lowercase();
        if v.is_empty() || seen.contains(&lower) {
            false
        } else {
            seen.push(lower);
            true
        }
    });
}

/// `None` for blank strings, trimmed otherwise.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============================================================================
// Drafts
// ============================================================================

/// In-memory, unsaved version of an entity edited through a slugged form.
pub trait Draft: Serialize + Clone + Default {
    type Entity: CatalogEntity;

    fn title(&self) -> &str;
    fn set_title(&mut self, title: String);
    fn slug(&self) -> &str;
    fn set_slug(&mut self, slug: String);

    fn validate(&self) -> std::result::Result<(), ValidationError>;

    /// Final normalisation right before the payload is sent.
    fn prepare(&mut self, _now: DateTime<Utc>) {}

    fn from_entity(entity: &Self::Entity) -> Self;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { original_slug: String },
}

/// Result of a successful submit: the saved entity and where to go next.
#[derive(Debug, Clone)]
pub struct Submitted<T> {
    pub entity: T,
    pub redirect_to: &'static str,
    pub redirect_after: Duration,
}

impl<T> Submitted<T> {
    /// Hold on the success message before navigating away.
    pub async fn wait(&self) {
        if !self.redirect_after.is_zero() {
            tokio::time::sleep(self.redirect_after).await;
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormState<D: Draft> {
    draft: D,
    mode: FormMode,
    slug_touched: bool,
    submitting: bool,
    error: Option<String>,
    redirect_delay: Duration,
}

impl<D: Draft> FormState<D> {
    pub fn create(redirect_delay: Duration) -> Self {
        Self {
            draft: D::default(),
            mode: FormMode::Create,
            slug_touched: false,
            submitting: false,
            error: None,
            redirect_delay,
        }
    }

    /// Editing keeps the stored slug even if the title changes.
    pub fn edit(entity: &D::Entity, redirect_delay: Duration) -> Self {
        let draft = D::from_entity(entity);
        Self {
            mode: FormMode::Edit {
                original_slug: draft.slug().to_string(),
            },
            draft,
            slug_touched: true,
            submitting: false,
            error: None,
            redirect_delay,
        }
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn slug_touched(&self) -> bool {
        self.slug_touched
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if !self.slug_touched {
            self.draft.set_slug(slugify(&title));
        }
        self.draft.set_title(title);
    }

    /// A hand-edited slug stops following the title. Clearing it resumes derivation.
    pub fn set_slug(&mut self, slug: impl Into<String>) {
        let slug = slug.into();
        if slug.trim().is_empty() {
            self.slug_touched = false;
            let derived = slugify(self.draft.title());
            self.draft.set_slug(derived);
        } else {
            self.slug_touched = true;
            self.draft.set_slug(slug);
        }
    }

    /// Mutate any other field.
    pub fn update(&mut self, f: impl FnOnce(&mut D)) {
        f(&mut self.draft);
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.draft.validate()
    }

    /// Validate, then POST (create) or PUT (edit). Validation failures never
    /// reach the network.
    pub async fn submit(&mut self, client: &ApiClient) -> Result<Submitted<D::Entity>> {
        self.error = None;

        if let Err(e) = self.draft.validate() {
            self.error = Some(e.first_message().to_string());
            return Err(AdminError::Validation(e));
        }

        let mut payload = self.draft.clone();
        payload.prepare(Utc::now());

        self.submitting = true;
        let result = match &self.mode {
            FormMode::Create => client.create::<D::Entity, D>(&payload).await,
            FormMode::Edit { original_slug } => {
                client
                    .update::<D::Entity, D>(original_slug, &payload)
                    .await
            }
        };
        self.submitting = false;

        match result {
            Ok(entity) => {
                self.draft = payload;
                self.mode = FormMode::Edit {
                    original_slug: self.draft.slug().to_string(),
                };
                self.slug_touched = true;
                Ok(Submitted {
                    entity,
                    redirect_to: <D::Entity as CatalogEntity>::RESOURCE.admin_path(),
                    redirect_after: self.redirect_delay,
                })
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
