#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fakeartist_server::start().await
}
