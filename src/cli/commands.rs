use clap::{Args, Parser, Subcommand};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_TIMESTAMP"), ")");

#[derive(Parser)]
#[command(name = "cryptbreak", version, long_version = LONG_VERSION, about = "Weak-cryptography analysis and cracking engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recover the preimage of an MD5/SHA-1/SHA-256 digest
    Hash(HashArgs),
    /// Try Base64, ROT13, Caesar and XOR decodings of a ciphertext
    Cipher(CipherArgs),
    /// Fingerprint a hex or Base64 ciphertext for ECB mode and size hints
    Blocks(BlocksArgs),
    /// Predict the next outputs of an observed number sequence
    Lcg(LcgArgs),
    /// Forge an unsigned token, or sign a payload with a known secret
    Forge(ForgeArgs),
    /// Recover the HMAC secret of a signed token
    JwtCrack(JwtCrackArgs),
    /// Decode a token's header and payload
    Decode(DecodeArgs),
    /// Solve a challenge question
    Challenge(ChallengeArgs),
    /// Demonstrate the timing prober against a leaky comparison
    TimingDemo(TimingDemoArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct HashArgs {
    /// Hex digest to crack
    pub digest: String,

    /// md5, sha1 or sha256 (detected from length if omitted)
    #[arg(short, long)]
    pub algorithm: Option<String>,

    /// Newline separated wordlist file
    #[arg(short, long)]
    pub wordlist: Option<String>,

    /// Longest brute-force candidate (MD5 only)
    #[arg(long)]
    pub max_length: Option<usize>,

    /// Brute-force alphabet
    #[arg(long)]
    pub charset: Option<String>,

    /// Stop after this many candidates
    #[arg(long)]
    pub max_attempts: Option<u64>,

    /// Worker threads (0 = one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Give up after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Args, Clone)]
pub struct CipherArgs {
    pub ciphertext: String,

    /// auto, hex, base64 or text
    #[arg(short, long, default_value = "auto")]
    pub encoding: String,

    /// Skip the block-mode analysis
    #[arg(long)]
    pub no_blocks: bool,

    /// Show only the first plausible candidate
    #[arg(long)]
    pub best: bool,
}

#[derive(Args, Clone)]
pub struct BlocksArgs {
    pub ciphertext: String,

    /// auto, hex, base64 or text
    #[arg(short, long, default_value = "auto")]
    pub encoding: String,
}

#[derive(Args, Clone)]
pub struct LcgArgs {
    /// Observed values, oldest first
    #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
    pub values: Vec<i64>,

    /// Number of values to predict
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
}

#[derive(Args, Clone)]
pub struct ForgeArgs {
    /// JSON object to use as payload
    #[arg(short, long)]
    pub payload: String,

    /// Sign with this secret instead of forging alg=none
    #[arg(short, long)]
    pub secret: Option<String>,

    /// HS256, HS384 or HS512 when signing
    #[arg(long, default_value = "HS256")]
    pub alg: String,
}

#[derive(Args, Clone)]
pub struct JwtCrackArgs {
    pub token: String,

    /// Newline separated secrets file (built-in list if omitted)
    #[arg(short, long)]
    pub wordlist: Option<String>,
}

#[derive(Args, Clone)]
pub struct DecodeArgs {
    pub token: String,
}

#[derive(Args, Clone)]
pub struct ChallengeArgs {
    pub question: String,

    /// Return a fallback answer, marked as a guess, when nothing matches
    #[arg(long)]
    pub allow_guess: bool,
}

#[derive(Args, Clone)]
pub struct TimingDemoArgs {
    /// Secret hidden behind the simulated comparison
    pub secret: String,

    /// Delay per matching character in milliseconds
    #[arg(long, default_value = "5")]
    pub delay_ms: u64,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
