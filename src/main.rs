//! Blog API - binary entry point
//! Delegates to the library for all app logic.

#[tokio::main]
async fn main() {
    if let Err(e) = blog_api::run().await {
        eprintln!("blog-api: {e}");
        std::process::exit(1);
    }
}
