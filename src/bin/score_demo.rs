//! Demo that scores a handful of URLs serially and prints one JSON line each.
//! Pass URLs as arguments, or run bare for a built-in sample mix.

use credibility_scorer::scorer;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let urls: Vec<String> = if args.is_empty() {
        [
            "https://www.nih.gov",
            "https://www.cdc.gov",
            "https://en.wikipedia.org/wiki/Main_Page",
            "example.com",
            "not a url",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    } else {
        args
    };

    for url in &urls {
        let result = scorer::score(url).await;
        let line = serde_json::json!({
            "url": url,
            "score": result.score,
            "explanation": result.explanation,
        });
        println!("{line}");
    }

    println!("score-demo done");
}
