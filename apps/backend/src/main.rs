#[tokio::main]
async fn main() -> anyhow::Result<()> {
    michi_backend::run().await
}
