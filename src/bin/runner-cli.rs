use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "runner-cli")]
#[command(about = "Operator CLI for a running model-runner instance", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3330")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke a method with a JSON payload (runner must be in JSON mode)
    Invoke {
        /// Method name, e.g. "predict"
        method: String,
        /// JSON payload, e.g. '{"x": 4}'
        payload: String,
    },
    /// Invoke a method with payload passed as query parameters
    Query {
        /// Method name, e.g. "predict"
        method: String,
        /// key=value pairs
        #[arg(required = true)]
        params: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Invoke { method, payload } => {
            // Fail early on payloads that are not even JSON.
            let value: Value = serde_json::from_str(&payload)?;
            let res = client
                .post(format!("{}/{}", cli.url, method))
                .json(&value)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Query { method, params } => {
            let pairs: Vec<(&str, &str)> = params
                .iter()
                .map(|p| p.split_once('=').unwrap_or((p.as_str(), "")))
                .collect();
            let res = client
                .get(format!("{}/{}", cli.url, method))
                .query(&pairs)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: runner returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
