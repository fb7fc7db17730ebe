//! # anamsg CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Anamorphic messaging toolchain.
///
/// Packs covert messages into the 30-bit wire integer, generates key
/// pairs, encrypts and decrypts both channels, and interprets free-text
/// instructions into schema fields.
#[derive(Parser, Debug)]
#[command(name = "anamsg", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Pack explicit field codes into a message integer.
    Encode(anamsg_cli::codec::EncodeArgs),
    /// Decode a packed integer and render it.
    Decode(anamsg_cli::codec::DecodeArgs),
    /// Generate both participants' key pairs.
    Keygen(anamsg_cli::keys::KeygenArgs),
    /// Encrypt the dictator integer and the covert message.
    Encrypt(anamsg_cli::cipher::EncryptArgs),
    /// Recover the dictator-channel integer.
    DecryptDictator(anamsg_cli::cipher::DecryptDictatorArgs),
    /// Recover the covert index (optionally decode it).
    DecryptAlice(anamsg_cli::cipher::DecryptAliceArgs),
    /// Interpret a free-text instruction into schema fields.
    Interpret(anamsg_cli::interpret::InterpretArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(args) => anamsg_cli::codec::encode_cmd(args),
        Commands::Decode(args) => anamsg_cli::codec::decode_cmd(args),
        Commands::Keygen(args) => anamsg_cli::keys::keygen_cmd(args),
        Commands::Encrypt(args) => anamsg_cli::cipher::encrypt_cmd(args),
        Commands::DecryptDictator(args) => anamsg_cli::cipher::decrypt_dictator_cmd(args),
        Commands::DecryptAlice(args) => anamsg_cli::cipher::decrypt_alice_cmd(args),
        Commands::Interpret(args) => anamsg_cli::interpret::interpret_cmd(args).await,
    }
}
