//! Loyalty intake server binary.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    loyalty_intake::server::run().await
}
