//! Solar-Crypto CLI Application
//!
//! A command-line interface for deriving identities, building transfers and
//! decoding transactions and blocks.

use clap::{Parser, Subcommand};
use solar_crypto::cli::{self, TransferArgs};

#[derive(Parser)]
#[command(name = "solar-crypto")]
#[command(version)]
#[command(about = "Solar network transaction and block cryptography", long_about = None)]
struct Cli {
    /// Bundled network to use (mainnet or testnet)
    #[arg(short, long, default_value = "testnet", global = true)]
    network: String,

    /// Resolve milestones at this block height
    #[arg(long, global = true)]
    height: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive public key, address and WIF
    Identity {
        /// Passphrase to derive from; random keys are generated when omitted
        #[arg(short, long)]
        passphrase: Option<String>,
    },

    /// Decode a hex serialised transaction
    DecodeTransaction {
        /// Transaction bytes as hex
        hex: String,
    },

    /// Decode and validate a hex serialised block
    DecodeBlock {
        /// Block bytes as hex
        hex: String,
    },

    /// Build and sign a transfer
    Transfer {
        /// Recipient address
        #[arg(short, long)]
        recipient: String,

        /// Amount in the smallest unit
        #[arg(short, long)]
        amount: u64,

        /// Sender nonce
        #[arg(long)]
        nonce: u64,

        /// Fee in the smallest unit, the static fee when omitted
        #[arg(short, long)]
        fee: Option<u64>,

        /// Memo, at most 255 bytes
        #[arg(short, long)]
        memo: Option<String>,

        /// Sender passphrase
        #[arg(short, long)]
        passphrase: String,

        /// Second passphrase when the sender has a second signature
        #[arg(long)]
        second_passphrase: Option<String>,
    },

    /// Sign a message
    SignMessage {
        #[arg(short, long)]
        message: String,

        #[arg(short, long)]
        passphrase: String,
    },

    /// Verify a signed message
    VerifyMessage {
        #[arg(long)]
        public_key: String,

        #[arg(short, long)]
        signature: String,

        #[arg(short, long)]
        message: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Message commands don't depend on the network
    match &cli.command {
        Commands::SignMessage { message, passphrase } => {
            return cli::cmd_sign_message(message, passphrase);
        }
        Commands::VerifyMessage {
            public_key,
            signature,
            message,
        } => {
            return cli::cmd_verify_message(public_key, signature, message);
        }
        _ => {}
    }

    let context = cli::load_context(&cli.network, cli.height)?;

    match cli.command {
        Commands::SignMessage { .. } | Commands::VerifyMessage { .. } => unreachable!(),

        Commands::Identity { passphrase } => {
            cli::cmd_identity(&context, passphrase.as_deref())?;
        }

        Commands::DecodeTransaction { hex } => {
            cli::cmd_decode_transaction(&context, &hex)?;
        }

        Commands::DecodeBlock { hex } => {
            cli::cmd_decode_block(&context, &hex)?;
        }

        Commands::Transfer {
            recipient,
            amount,
            nonce,
            fee,
            memo,
            passphrase,
            second_passphrase,
        } => {
            let args = TransferArgs {
                recipient: &recipient,
                amount,
                nonce,
                fee,
                memo: memo.as_deref(),
                passphrase: &passphrase,
                second_passphrase: second_passphrase.as_deref(),
            };
            cli::cmd_transfer(&context, &args)?;
        }
    }

    Ok(())
}
