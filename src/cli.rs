//! Command-line surface for the admin core.
//!
//! # Usage
//!
//! ```bash
//! # List published blog posts mentioning rust, oldest first
//! u3devlab-admin blog list --search rust --status published --sort oldest
//!
//! # Create a product from a JSON file (slug derived from the title if missing)
//! u3devlab-admin products create --file brand-kit.json
//!
//! # Ebooks under 20, cheapest first
//! u3devlab-admin products list --type ebook --max-price 20 --sort price-asc
//!
//! # Delete without the confirmation prompt
//! u3devlab-admin portfolio delete fintech-dashboard --yes
//!
//! # Inbox
//! u3devlab-admin messages list --status unread
//! u3devlab-admin messages mark 65f0c2 replied
//! ```

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::admin::{AdminList, Inbox};
use crate::catalog::filter::{apply, CatalogQuery, Listable, SortKey};
use crate::catalog::slug::{estimate_read_time, slugify};
use crate::client::{ApiClient, CatalogEntity, ProductListQuery};
use crate::config::AdminConfig;
use crate::forms::{
    BlogDraft, ContactDraft, Draft, FormState, PortfolioDraft, ProductDraft, ReviewDraft,
};
use crate::models::{Message, MessageStatus, Product, ProductType, ReviewSummary};

#[derive(Parser, Debug)]
#[command(name = "u3devlab-admin")]
#[command(author, version, about = "Manage the U3DEVLAB catalog", long_about = None)]
pub struct Cli {
    /// API base URL (overrides API_BASE_URL)
    #[arg(long, global = true)]
    pub api: Option<String>,

    /// Bearer token (overrides ADMIN_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Keep logs out of the terminal; log files still receive them
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Blog posts
    #[command(subcommand)]
    Blog(EntityCommand),

    /// Portfolio projects
    #[command(subcommand)]
    Portfolio(EntityCommand),

    /// Shop items and ebooks
    #[command(subcommand)]
    Products(ProductCommand),

    /// Contact messages inbox
    #[command(subcommand)]
    Messages(MessageCommand),

    /// Send a contact form message
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        service: Option<String>,
        #[arg(long)]
        budget: Option<String>,
    },

    /// Upload an image and print its hosted URL
    Upload { path: PathBuf },

    /// Print the slug derived from a title
    Slug { title: String },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive match on title, description and tags
    #[arg(short, long)]
    pub search: Option<String>,

    #[arg(short, long)]
    pub category: Option<String>,

    /// e.g. published, draft, unread ("all" disables the filter)
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub min_price: Option<f64>,

    #[arg(long)]
    pub max_price: Option<f64>,

    /// newest, oldest, price-asc, price-desc, most-viewed
    #[arg(long, default_value = "newest")]
    pub sort: SortKey,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    pub fn query(&self) -> CatalogQuery {
        CatalogQuery {
            search: self.search.clone(),
            category: self.category.clone(),
            status: self.status.clone(),
            ..CatalogQuery::default()
        }
        .price_between(self.min_price, self.max_price)
        .sort(self.sort)
    }
}

#[derive(Subcommand, Debug)]
pub enum EntityCommand {
    List(ListArgs),

    Show {
        slug: String,
    },

    /// Create from a JSON file
    Create {
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Replace fields from a JSON file; the slug stays unless the file sets one
    Edit {
        slug: String,
        #[arg(short, long)]
        file: PathBuf,
    },

    Delete {
        slug: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    List {
        #[command(flatten)]
        list: ListArgs,

        /// product or ebook
        #[arg(long = "type")]
        product_type: Option<ProductType>,

        #[arg(long)]
        limit: Option<u32>,
    },

    Show {
        slug: String,
    },

    Create {
        #[arg(short, long)]
        file: PathBuf,
    },

    Edit {
        slug: String,
        #[arg(short, long)]
        file: PathBuf,
    },

    Delete {
        slug: String,
        #[arg(short, long)]
        yes: bool,
    },

    /// Reviews for a product, with a rating summary
    Reviews {
        product_id: String,
        #[arg(long)]
        json: bool,
    },

    /// Leave a review
    Review {
        product_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        comment: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MessageCommand {
    List(ListArgs),

    /// Show a message; unread messages are marked read
    Show { id: String },

    /// Set a message status (unread, read, replied)
    Mark { id: String, status: MessageStatus },

    Delete {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// Environment config with command-line overrides applied.
    pub fn config(&self) -> AdminConfig {
        let mut config = AdminConfig::default();
        if let Some(api) = &self.api {
            config.api_base_url = api.clone();
        }
        if let Some(token) = &self.token {
            config.admin_token = Some(token.clone());
        }
        if self.verbose {
            config.log_level = crate::logging::config::LogLevel::Debug;
        }
        config
    }
}

// ============================================================================
// Dispatch
// ============================================================================

pub async fn execute(command: Commands, config: &AdminConfig) -> anyhow::Result<()> {
    if let Commands::Slug { title } = &command {
        println!("{}", slugify(title));
        return Ok(());
    }

    let client = ApiClient::new(config)?;

    match command {
        Commands::Blog(cmd) => entity_command::<BlogDraft>(cmd, &client, config).await,
        Commands::Portfolio(cmd) => entity_command::<PortfolioDraft>(cmd, &client, config).await,
        Commands::Products(cmd) => product_command(cmd, &client, config).await,
        Commands::Messages(cmd) => message_command(cmd, &client).await,
        Commands::Contact {
            name,
            email,
            message,
            company,
            service,
            budget,
        } => {
            let draft = ContactDraft {
                full_name: name,
                email,
                company,
                service,
                budget,
                message,
            };
            draft.submit(&client).await?;
            println!("Thank you! Your message has been sent.");
            Ok(())
        }
        Commands::Upload { path } => {
            let url = client.upload_image(&path).await?;
            println!("{}", url);
            Ok(())
        }
        Commands::Slug { .. } => Ok(()),
    }
}

async fn entity_command<D: Draft>(
    cmd: EntityCommand,
    client: &ApiClient,
    config: &AdminConfig,
) -> anyhow::Result<()> {
    match cmd {
        EntityCommand::List(args) => {
            let mut list = AdminList::<D::Entity>::with_query(args.query());
            list.refresh(client).await;
            if let Some(error) = list.state().error() {
                bail!("{}", error);
            }
            print_list(&list.visible(), args.json)
        }
        EntityCommand::Show { slug } => {
            let entity = client.fetch_one::<D::Entity>(&slug).await?;
            print_json(&entity)
        }
        EntityCommand::Create { file } => create::<D>(client, config, &file).await,
        EntityCommand::Edit { slug, file } => edit::<D>(client, config, &slug, &file).await,
        EntityCommand::Delete { slug, yes } => delete::<D::Entity>(client, &slug, yes).await,
    }
}

async fn product_command(
    cmd: ProductCommand,
    client: &ApiClient,
    config: &AdminConfig,
) -> anyhow::Result<()> {
    match cmd {
        ProductCommand::List {
            list,
            product_type,
            limit,
        } => {
            // type, category and limit go to the server; the rest is local
            let server_query = ProductListQuery {
                product_type,
                category: list.category.clone(),
                limit,
            };
            let products = client.list_products(&server_query).await?;
            print_list(&apply(&products, &list.query()), list.json)
        }
        ProductCommand::Show { slug } => print_json(&client.fetch_one::<Product>(&slug).await?),
        ProductCommand::Create { file } => create::<ProductDraft>(client, config, &file).await,
        ProductCommand::Edit { slug, file } => {
            edit::<ProductDraft>(client, config, &slug, &file).await
        }
        ProductCommand::Delete { slug, yes } => delete::<Product>(client, &slug, yes).await,
        ProductCommand::Reviews { product_id, json } => {
            let reviews = client.list_reviews(&product_id).await?;
            if json {
                return print_json(&reviews);
            }
            let summary = ReviewSummary::from_reviews(&reviews);
            println!("{} reviews, average {:.1}", summary.count, summary.average);
            for (i, count) in summary.histogram.iter().enumerate().rev() {
                println!("  {} stars: {}", i + 1, count);
            }
            for review in &reviews {
                println!(
                    "{}  {}/5  {}",
                    review.user_name, review.rating, review.comment
                );
            }
            Ok(())
        }
        ProductCommand::Review {
            product_id,
            name,
            rating,
            comment,
            title,
            email,
        } => {
            let draft = ReviewDraft {
                product_id,
                user_name: name,
                email,
                rating,
                title,
                comment,
            };
            draft.submit(client).await?;
            println!("Review submitted.");
            Ok(())
        }
    }
}

async fn message_command(cmd: MessageCommand, client: &ApiClient) -> anyhow::Result<()> {
    let mut inbox = Inbox::new();

    match cmd {
        MessageCommand::List(args) => {
            inbox.set_query(args.query());
            inbox.refresh(client).await;
            if let Some(error) = inbox.list().state().error() {
                bail!("{}", error);
            }
            if !args.json {
                println!("{} unread", inbox.unread_count());
            }
            print_list(&inbox.visible(), args.json)
        }
        MessageCommand::Show { id } => {
            let message = inbox.open(client, &id).await?;
            print_message(&message);
            Ok(())
        }
        MessageCommand::Mark { id, status } => {
            let message = inbox.set_status(client, &id, status).await?;
            println!("{} -> {}", message.id(), message.status);
            Ok(())
        }
        MessageCommand::Delete { id, yes } => delete::<Message>(client, &id, yes).await,
    }
}

// ============================================================================
// Shared flows
// ============================================================================

fn read_entity<T: CatalogEntity>(file: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("could not read {}", file.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a valid entity", file.display()))
}

async fn create<D: Draft>(client: &ApiClient, config: &AdminConfig, file: &Path) -> anyhow::Result<()> {
    let entity: D::Entity = read_entity(file)?;
    let draft = D::from_entity(&entity);
    let title = draft.title().to_string();
    let slug = draft.slug().to_string();

    let mut form = FormState::<D>::create(config.redirect_delay);
    form.update(|d| *d = draft);
    form.set_title(title);
    if !slug.trim().is_empty() {
        form.set_slug(slug);
    }

    let submitted = form.submit(client).await?;
    println!(
        "Created {} '{}'",
        <D::Entity as CatalogEntity>::RESOURCE.label(),
        submitted.entity.key()
    );
    submitted.wait().await;
    println!("-> {}", submitted.redirect_to);
    Ok(())
}

async fn edit<D: Draft>(
    client: &ApiClient,
    config: &AdminConfig,
    slug: &str,
    file: &Path,
) -> anyhow::Result<()> {
    let existing = client.fetch_one::<D::Entity>(slug).await?;
    let changes: D::Entity = read_entity(file)?;
    let mut replacement = D::from_entity(&changes);
    if replacement.slug().trim().is_empty() {
        replacement.set_slug(slug.to_string());
    }

    let mut form = FormState::<D>::edit(&existing, config.redirect_delay);
    form.update(|d| *d = replacement);

    let submitted = form.submit(client).await?;
    println!(
        "Updated {} '{}'",
        <D::Entity as CatalogEntity>::RESOURCE.label(),
        submitted.entity.key()
    );
    submitted.wait().await;
    println!("-> {}", submitted.redirect_to);
    Ok(())
}

async fn delete<T: CatalogEntity>(client: &ApiClient, key: &str, yes: bool) -> anyhow::Result<()> {
    let label = T::RESOURCE.label();
    let mut list = AdminList::<T>::new();
    list.request_delete(key);

    if !yes && !confirm(&format!("Delete {} '{}'? This cannot be undone.", label, key))? {
        list.cancel_delete();
        println!("Cancelled.");
        return Ok(());
    }

    if !list.confirm_delete(client).await {
        let error = list
            .delete_flow()
            .error()
            .unwrap_or("Delete failed")
            .to_string();
        bail!("{}", error);
    }

    println!("Deleted {} '{}'", label, key);
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

// ============================================================================
// Output
// ============================================================================

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_list<T: Listable + Serialize>(items: &[&T], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(items);
    }

    if items.is_empty() {
        println!("No items found.");
        return Ok(());
    }

    for item in items {
        println!("{}", format_row(*item));
    }
    Ok(())
}

fn format_row<T: Listable>(item: &T) -> String {
    let date = item
        .created_at()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut row = format!("{:<32} {:<10} {:<10} {}", item.key(), item.status(), date, item.title());
    if let Some(price) = item.effective_price() {
        row.push_str(&format!("  ${:.2}", price));
    }
    row
}

fn print_message(message: &Message) {
    println!("From:    {} <{}>", message.full_name, message.email);
    if let Some(company) = &message.company {
        println!("Company: {}", company);
    }
    if let Some(service) = &message.service {
        println!("Service: {}", service);
    }
    if let Some(budget) = &message.budget {
        println!("Budget:  {}", budget);
    }
    if let Some(date) = message.received_at() {
        println!("Date:    {}", date.format("%Y-%m-%d %H:%M"));
    }
    println!("Status:  {}", message.status);
    println!();
    println!("{}", message.message);
}

/// Slug and read time for the `slugify` helper binary.
pub fn describe_title(title: &str, html: Option<&str>) -> String {
    let mut out = format!("slug: {}", slugify(title));
    if let Some(html) = html {
        out.push_str(&format!("\nread time: {} min", estimate_read_time(html)));
    }
    out
}
