//! Key generation subcommand.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use anamsg_crypto::KeyFile;

/// Arguments for `anamsg keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Output JSON file.
    #[arg(long, default_value = "keys.json")]
    pub out: PathBuf,
}

/// Generate both participants' key pairs and write the key artifact.
pub fn keygen_cmd(args: KeygenArgs) -> anyhow::Result<()> {
    let keys = KeyFile::generate();
    let json = serde_json::to_string_pretty(&keys).context("serializing keys")?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("writing {}", args.out.display()))?;

    println!("Keys written to {}", args.out.display());
    println!("Dictator pub fingerprint: {}", keys.dictator.public.fingerprint());
    println!("Alice pub fingerprint:    {}", keys.alice.public.fingerprint());
    Ok(())
}
