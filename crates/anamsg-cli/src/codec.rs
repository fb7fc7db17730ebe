//! Codec subcommands: pack explicit field codes, and decode a raw packed
//! integer back to its rendered form.

use anyhow::Context;
use clap::Args;

use anamsg_core::{decode, encode, render, FieldValues, PackedMessage};

/// Arguments for `anamsg encode`.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Action code (0-63).
    #[arg(long)]
    pub action: u8,
    /// Target code (0-63).
    #[arg(long)]
    pub target: u8,
    /// Hour of day (0-23).
    #[arg(long)]
    pub hour: u8,
    /// Minute (0-59).
    #[arg(long)]
    pub minute: u8,
    /// Location code (0-15).
    #[arg(long = "where")]
    pub location: u8,
    /// Flag code (0-1).
    #[arg(long, default_value_t = 0)]
    pub flags: u8,
    /// Time-modifier code (0-3).
    #[arg(long, default_value_t = 0)]
    pub modifier: u8,
}

/// Arguments for `anamsg decode`.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// The packed message integer.
    pub value: String,
}

/// Pack field codes and print the wire integer.
pub fn encode_cmd(args: EncodeArgs) -> anyhow::Result<()> {
    let fields = FieldValues {
        action: args.action,
        target: args.target,
        hour: args.hour,
        minute: args.minute,
        location: args.location,
        flags: args.flags,
        modifier: args.modifier,
    };
    let message = encode(&fields).context("encoding failed")?;
    println!("{message}");
    Ok(())
}

/// Decode a packed integer and print the rendered message.
pub fn decode_cmd(args: DecodeArgs) -> anyhow::Result<()> {
    let message: PackedMessage = args.value.parse().context("invalid packed message")?;
    let decoded = decode(message);
    println!("{}", render(Some(&decoded)));
    Ok(())
}
