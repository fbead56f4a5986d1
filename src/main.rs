use log_tail::{StartMode, TailConfig, tail_log};
use std::env;
use std::process;
use tokio_stream::StreamExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    let (file_path, mode) = match args.as_slice() {
        [_, path] => (path, StartMode::FollowFromNow),
        [_, path, flag] if flag == "--replay" => (path, StartMode::ReplayFromStart),
        _ => {
            eprintln!("Usage: {} <file_path> [--replay]", args[0]);
            process::exit(1);
        }
    };

    let config = TailConfig::default().with_mode(mode);

    match tail_log(file_path, config).await {
        Ok(mut stream) => {
            println!("Tailing file: {}", file_path);
            while let Some(line) = stream.next().await {
                match line {
                    Ok(line) => println!("{}", line),
                    Err(e) => eprintln!("Error reading file: {}", e),
                }
            }
        }
        Err(e) => {
            eprintln!("Error starting tail: {}", e);
            process::exit(1);
        }
    }
}
