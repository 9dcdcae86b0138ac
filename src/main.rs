use clap::Parser;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use postsearch::{PostRecord, PostSearch, SearchConfig, SearchEngine, SearchResult};

mod cli;
use cli::display;
use cli::{Cli, Commands};

/// JSON shape of one search hit.
#[derive(Serialize)]
struct Hit<'a> {
    #[serde(flatten)]
    post: &'a PostRecord,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    result: Option<&'a SearchResult>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SearchConfig::default(),
    };

    match cli.command {
        Commands::Search {
            posts,
            query,
            tag,
            limit,
            json,
        } => {
            if let Some(limit) = limit {
                config.default_limit = limit;
            }
            let search = build_search(load_posts(&posts)?, &config)?;
            run_search(&search, &query, &tag, config.default_limit, json)
        }
        Commands::Tag { posts, tag, json } => {
            let search = build_search(load_posts(&posts)?, &config)?;
            run_tag(&search, &tag, json)
        }
        Commands::Stats { posts, json } => {
            let search = build_search(load_posts(&posts)?, &config)?;
            let stats = search.stats();
            if json {
                print_json(&stats)
            } else {
                display::print_stats(&stats);
                Ok(())
            }
        }
    }
}

fn load_config(path: &Path) -> Result<SearchConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
    SearchConfig::from_json(&raw).map_err(|e| format!("Invalid config {}: {}", path.display(), e))
}

fn load_posts(path: &Path) -> Result<Vec<PostRecord>, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read posts {}: {}", path.display(), e))?;
    serde_json::from_str(&raw).map_err(|e| format!("Invalid posts file {}: {}", path.display(), e))
}

/// Index `posts` through the façade on a throwaway current-thread runtime.
fn build_search(posts: Vec<PostRecord>, config: &SearchConfig) -> Result<PostSearch, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {}", e))?;

    let search = PostSearch::new(SearchEngine::new()).with_default_limit(config.default_limit);
    runtime
        .block_on(search.init(posts))
        .map_err(|e| e.to_string())?;
    Ok(search)
}

fn run_search(
    search: &PostSearch,
    query: &str,
    tag: &str,
    limit: usize,
    json: bool,
) -> Result<(), String> {
    let term = query.trim();
    let tag = tag.trim();

    let posts = search.combined_search(term, tag, limit);
    let scored = if !term.is_empty() {
        search.search(term, limit)
    } else if !tag.is_empty() {
        search.search_by_tag(tag)
    } else {
        Vec::new()
    };
    let by_id: HashMap<&str, &SearchResult> = scored.iter().map(|r| (r.id.as_str(), r)).collect();

    if json {
        let hits: Vec<Hit<'_>> = posts
            .iter()
            .map(|post| Hit {
                post,
                result: by_id.get(post.id.as_str()).copied(),
            })
            .collect();
        return print_json(&hits);
    }

    if posts.is_empty() {
        display::print_no_results(&format!("nothing matched \"{}\"", query));
        return Ok(());
    }
    for (rank, post) in posts.iter().enumerate() {
        display::print_post(rank + 1, post, by_id.get(post.id.as_str()).copied());
    }
    Ok(())
}

fn run_tag(search: &PostSearch, tag: &str, json: bool) -> Result<(), String> {
    let results = search.search_by_tag(tag);
    let posts = search.get_posts_from_results(&results);

    if json {
        let hits: Vec<Hit<'_>> = posts
            .iter()
            .zip(&results)
            .map(|(post, result)| Hit {
                post,
                result: Some(result),
            })
            .collect();
        return print_json(&hits);
    }

    if posts.is_empty() {
        display::print_no_results(&format!("no post is tagged \"{}\"", tag));
        return Ok(());
    }
    for (rank, (post, result)) in posts.iter().zip(&results).enumerate() {
        display::print_post(rank + 1, post, Some(result));
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let out = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", out);
    Ok(())
}
