//! Cipher subcommands: encrypt, dictator decrypt, and Alice's
//! covert-index recovery.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Args;

use anamsg_core::{decode, parse_recovered_message, render, PackedMessage};
use anamsg_crypto::{
    decrypt_dictator, encrypt, recover_index, CipherText, CryptoError, SecretScalar,
};

/// Search bound used when `--max` is negative.
const DEFAULT_SEARCH_BOUND: u64 = 1000;

/// Arguments for `anamsg encrypt`.
#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// Dictator private scalar (hex).
    #[arg(long)]
    pub dict_priv: String,
    /// Alice private scalar (hex).
    #[arg(long)]
    pub alice_priv: String,
    /// Dictator message integer.
    #[arg(long, default_value = "5")]
    pub x: u64,
    /// Hidden message for Alice (packed index).
    #[arg(long, default_value = "99")]
    pub cm: String,
    /// Output JSON file path.
    #[arg(long, default_value = "cipher.json")]
    pub out: PathBuf,
}

/// Arguments for `anamsg decrypt-dictator`.
#[derive(Args, Debug)]
pub struct DecryptDictatorArgs {
    /// Dictator private scalar (hex).
    #[arg(long)]
    pub dict_priv: String,
    /// Cipher JSON file.
    #[arg(long, default_value = "cipher.json")]
    pub cipher: PathBuf,
}

/// Arguments for `anamsg decrypt-alice`.
#[derive(Args, Debug)]
pub struct DecryptAliceArgs {
    /// Alice private scalar (hex).
    #[arg(long)]
    pub alice_priv: String,
    /// Cipher JSON file.
    #[arg(long, default_value = "cipher.json")]
    pub cipher: PathBuf,
    /// Upper bound for the index search; negative selects the default.
    #[arg(long, default_value_t = -1)]
    pub max: i64,
    /// Decode the recovered index and print the rendered message.
    #[arg(long)]
    pub decode: bool,
}

fn read_cipher(path: &PathBuf) -> anyhow::Result<CipherText> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

/// Encrypt both channels and write the cipher artifact.
pub fn encrypt_cmd(args: EncryptArgs) -> anyhow::Result<()> {
    let dict = SecretScalar::from_hex(&args.dict_priv).context("parsing --dict-priv")?;
    let alice = SecretScalar::from_hex(&args.alice_priv).context("parsing --alice-priv")?;
    let cm: PackedMessage = args.cm.parse().context("parsing --cm")?;

    let cipher = encrypt(&dict, &alice, args.x, cm);
    let json = serde_json::to_string(&cipher).context("serializing cipher")?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("writing {}", args.out.display()))?;

    println!("Encrypted (c0): {}", cipher.c0_hex());
    println!("Encrypted (c1): {}", cipher.c1_hex());
    println!("SHA256(c1): {}", cipher.c1_fingerprint());
    Ok(())
}

/// Recover and print the dictator-channel integer.
pub fn decrypt_dictator_cmd(args: DecryptDictatorArgs) -> anyhow::Result<()> {
    let dict = SecretScalar::from_hex(&args.dict_priv).context("parsing --dict-priv")?;
    let cipher = read_cipher(&args.cipher)?;

    let start = Instant::now();
    let x = decrypt_dictator(&dict, &cipher)?;
    println!("Dictator recovered: {x} (in {:?})", start.elapsed());
    Ok(())
}

/// Recover the covert index; with `--decode`, push the status line through
/// the sanctioned parser and print the rendered message.
pub fn decrypt_alice_cmd(args: DecryptAliceArgs) -> anyhow::Result<()> {
    let alice = SecretScalar::from_hex(&args.alice_priv).context("parsing --alice-priv")?;
    let cipher = read_cipher(&args.cipher)?;

    let bound = if args.max < 0 {
        DEFAULT_SEARCH_BOUND
    } else {
        args.max as u64
    };

    let status = match recover_index(&alice, &cipher, bound) {
        Ok(recovery) => recovery.status_line(),
        Err(err @ CryptoError::IndexNotFound { .. }) => format!("Alice {err}"),
        Err(other) => return Err(other.into()),
    };
    println!("{status}");

    if args.decode {
        // The decode path consumes the status line exactly as a remote
        // caller would: digits out of the report, then the range guard.
        let message = parse_recovered_message(&status)?;
        let decoded = decode(message);
        println!("{}", render(Some(&decoded)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anamsg_crypto::KeyPair;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("anamsg-cli-test-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_encrypt_then_decrypt_both_channels_via_files() {
        let dict = KeyPair::generate();
        let alice = KeyPair::generate();
        let out = temp_path("cipher.json");

        encrypt_cmd(EncryptArgs {
            dict_priv: dict.secret.to_hex(),
            alice_priv: alice.secret.to_hex(),
            x: 5,
            cm: "99".to_string(),
            out: out.clone(),
        })
        .expect("encrypt writes the cipher");

        decrypt_dictator_cmd(DecryptDictatorArgs {
            dict_priv: dict.secret.to_hex(),
            cipher: out.clone(),
        })
        .expect("dictator channel decrypts");

        decrypt_alice_cmd(DecryptAliceArgs {
            alice_priv: alice.secret.to_hex(),
            cipher: out.clone(),
            max: -1,
            decode: true,
        })
        .expect("covert channel recovers and decodes");

        let _ = std::fs::remove_file(out);
    }

    #[test]
    fn test_missing_cipher_file_is_an_error() {
        let err = decrypt_dictator_cmd(DecryptDictatorArgs {
            dict_priv: KeyPair::generate().secret.to_hex(),
            cipher: temp_path("does-not-exist.json"),
        })
        .unwrap_err();
        assert!(err.to_string().contains("reading"));
    }
}
