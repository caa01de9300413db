use std::env;

#[tokio::main]
async fn main() {
    if let Err(e) = buy_or_rent::logging::init_logging("info") {
        eprintln!("Logging disabled: {e}");
    }

    let raw_args: Vec<String> = env::args().collect();
    match raw_args.get(1).map(|s| s.as_str()) {
        Some("serve") => {
            let port = raw_args
                .get(2)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(8080);
            if let Err(e) = buy_or_rent::api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Some("simulate") => {
            let result = tokio::task::spawn_blocking(move || {
                buy_or_rent::api::run_cli(raw_args.into_iter().skip(1))
            })
            .await;
            match result {
                Ok(Ok(json)) => println!("{json}"),
                Ok(Err(msg)) => {
                    eprintln!("{msg}");
                    std::process::exit(2);
                }
                Err(e) => {
                    eprintln!("Simulation failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        _ => {
            eprintln!("Usage: buy_or_rent serve [port] | buy_or_rent simulate [options]");
            std::process::exit(1);
        }
    }
}
