use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    repodeck_cli::run_cli().await
}
