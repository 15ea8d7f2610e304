use std::process;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("contextiq=info".parse().expect("valid directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = contextiq::cli::run().await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
