use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // reqwest is built without a bundled crypto provider; install one
    // before any TLS connection is attempted.
    let _ = rustls::crypto::ring::default_provider().install_default();

    folio::cli::run().await
}
