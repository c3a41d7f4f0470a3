use std::env;

use u3devlab_admin::cli::describe_title;

fn main() {
    let mut args = env::args().skip(1);
    let title = args.next().unwrap_or_else(|| {
        eprintln!("Usage: cargo run --bin slugify <TITLE> [CONTENT.html]");
        std::process::exit(1);
    });

    let html = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(html) => Some(html),
            Err(e) => {
                eprintln!("Error reading {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    println!("\nTitle : {}", title);
    println!("{}\n", describe_title(&title, html.as_deref()));
}
