use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

use bookfinder::catalog::CatalogClient;
use bookfinder::cli::{SearchArgs, ShowArgs};
use bookfinder::config::CatalogConfig;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    bookfinder::logging::init().context("init logging")?;

    let cli = bookfinder::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        bookfinder::cli::Command::Serve(args) => {
            bookfinder::web::run(args).await.context("serve")?;
        }
        bookfinder::cli::Command::Search(args) => {
            search(args).await.context("search")?;
        }
        bookfinder::cli::Command::Show(args) => {
            show(args).await.context("show")?;
        }
    }

    Ok(())
}

async fn search(args: SearchArgs) -> anyhow::Result<()> {
    let client = CatalogClient::new(CatalogConfig::from_env())?;
    let results = client.search(&args.query, args.max_results).await?;

    println!("total: {}", results.total_items);
    for volume in &results.items {
        let info = &volume.volume_info;
        match info.author_line() {
            Some(authors) => println!("{}  {} by {}", volume.id, info.title, authors),
            None => println!("{}  {}", volume.id, info.title),
        }
    }

    Ok(())
}

async fn show(args: ShowArgs) -> anyhow::Result<()> {
    let client = CatalogClient::new(CatalogConfig::from_env())?;
    let volume = client.volume(&args.id).await?;
    let info = &volume.volume_info;

    println!("id: {}", volume.id);
    println!("title: {}", info.title);
    if let Some(subtitle) = &info.subtitle {
        println!("subtitle: {subtitle}");
    }
    if let Some(authors) = info.author_line() {
        println!("authors: {authors}");
    }
    if let Some(publisher) = &info.publisher {
        println!("publisher: {publisher}");
    }
    if let Some(date) = &info.published_date {
        println!("published: {date}");
    }
    if let Some(pages) = info.page_count {
        println!("pages: {pages}");
    }
    if !info.categories.is_empty() {
        println!("categories: {}", info.categories.join(", "));
    }
    if let Some(link) = &info.info_link {
        println!("info: {link}");
    }

    Ok(())
}
