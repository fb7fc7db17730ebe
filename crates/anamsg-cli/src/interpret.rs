//! Natural-language interpretation subcommand.

use anyhow::Context;
use clap::Args;
use url::Url;

use anamsg_core::{decode, render};
use anamsg_interpret::InterpreterClient;

/// Arguments for `anamsg interpret`.
#[derive(Args, Debug)]
pub struct InterpretArgs {
    /// The free-text instruction to interpret.
    pub message: String,
    /// Interpretation endpoint root.
    #[arg(long, default_value = "https://api.openai.com")]
    pub base_url: Url,
    /// API key; falls back to the OPENAI_API_KEY environment variable.
    #[arg(long)]
    pub api_key: Option<String>,
    /// Model override.
    #[arg(long)]
    pub model: Option<String>,
}

/// Interpret free text, print the reading, and print the packed integer.
pub async fn interpret_cmd(args: InterpretArgs) -> anyhow::Result<()> {
    let api_key = match args.api_key {
        Some(key) => key,
        None => std::env::var("OPENAI_API_KEY")
            .context("no --api-key given and OPENAI_API_KEY is unset")?,
    };

    let mut client = InterpreterClient::new(args.base_url, api_key)?;
    if let Some(model) = args.model {
        client = client.with_model(model);
    }

    let interp = client.interpret(&args.message).await?;

    println!("{}", interp.explanation);
    println!("{}", render(Some(&decode(interp.message))));
    println!("cm: {}", interp.message);
    Ok(())
}
