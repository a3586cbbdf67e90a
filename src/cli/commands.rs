//! CLI commands
//!
//! Each handler works on a [`NetworkContext`] for the selected network and
//! prints to stdout.

use serde_json::json;

use crate::blocks::BlockFactory;
use crate::context::NetworkContext;
use crate::crypto::{Message, SignedMessage};
use crate::identities::{Address, Keys, Wif};
use crate::transactions::{BuilderFactory, TransactionFactory};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Open the context for a bundled network, optionally pinned to a height
pub fn load_context(network: &str, height: Option<u32>) -> CliResult<NetworkContext> {
    let context = NetworkContext::from_preset(network)?;
    if let Some(height) = height {
        context.config().set_height(height);
    }
    log::debug!("Using {:?}", context);
    Ok(context)
}

/// Derive keys, address and WIF from a passphrase, or from fresh random keys
pub fn cmd_identity(context: &NetworkContext, passphrase: Option<&str>) -> CliResult<()> {
    let keys = match passphrase {
        Some(passphrase) => Keys::from_passphrase(passphrase)?,
        None => {
            println!("🎲 No passphrase given, generated a random key pair");
            Keys::generate()
        }
    };

    println!("🔐 Identity on {}", context.config().network().name);
    println!("   📍 Address: {}", Address::from_private_key(&keys, context.network_version())?);
    println!("   🔑 Public Key: {}", keys.public_key_hex());
    println!("   🗝️  Private Key: {}", keys.private_key_hex());
    println!("   📦 WIF: {}", Wif::from_keys(&keys, context.wif_version()));
    Ok(())
}

/// Decode a hex transaction and print it as JSON with its verification result
pub fn cmd_decode_transaction(context: &NetworkContext, serialised: &str) -> CliResult<()> {
    let transaction = TransactionFactory::from_hex(context, serialised.trim())?;
    let output = json!({
        "summary": transaction.describe(context),
        "verified": transaction.verify(context)?,
        "transaction": transaction.to_json(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Decode a hex block and print it as JSON with its validation errors
pub fn cmd_decode_block(context: &NetworkContext, serialised: &str) -> CliResult<()> {
    let block = BlockFactory::from_hex(context, serialised.trim())?;
    let output = json!({
        "verified": block.verification.verified,
        "containsMultiSignatures": block.verification.contains_multi_signatures,
        "errors": block.verification.errors,
        "block": block.to_json(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Parameters of [`cmd_transfer`]
pub struct TransferArgs<'a> {
    pub recipient: &'a str,
    pub amount: u64,
    pub nonce: u64,
    pub fee: Option<u64>,
    pub memo: Option<&'a str>,
    pub passphrase: &'a str,
    pub second_passphrase: Option<&'a str>,
}

/// Build and sign a transfer, print its JSON and hex
pub fn cmd_transfer(context: &NetworkContext, args: &TransferArgs<'_>) -> CliResult<()> {
    let mut builder = BuilderFactory::transfer(context)
        .recipient_id(args.recipient)
        .amount(args.amount)
        .nonce(args.nonce);
    if let Some(fee) = args.fee {
        builder = builder.fee(fee);
    }
    if let Some(memo) = args.memo {
        builder = builder.memo(memo)?;
    }

    builder = builder.sign(args.passphrase)?;
    if let Some(second_passphrase) = args.second_passphrase {
        builder = builder.second_sign(second_passphrase)?;
    }
    let transaction = builder.build()?;

    println!("✅ {}", transaction.describe(context));
    println!("{}", serde_json::to_string_pretty(&transaction.to_json())?);
    println!("\n{}", hex::encode(&transaction.serialised));
    Ok(())
}

pub fn cmd_sign_message(message: &str, passphrase: &str) -> CliResult<()> {
    let signed = Message::sign(message, passphrase)?;
    println!("{}", serde_json::to_string_pretty(&signed)?);
    Ok(())
}

pub fn cmd_verify_message(public_key: &str, signature: &str, message: &str) -> CliResult<()> {
    let signed = SignedMessage {
        public_key: public_key.to_string(),
        signature: signature.to_string(),
        message: message.to_string(),
    };

    if Message::verify(&signed) {
        println!("✅ Signature is valid");
    } else {
        println!("❌ Signature is invalid");
    }
    Ok(())
}
