use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::models::ContentType;

#[derive(Parser)]
#[command(
    name = "credisource",
    version,
    long_version = crate::LONG_VERSION,
    about = "Verify images, videos, and text for AI generation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Verification API base URL
    #[arg(long, env = "CREDISOURCE_API_URL", global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit content for verification and wait for the verdict
    #[command(subcommand)]
    Verify(VerifyCommand),
    /// Follow an existing verification job until it finishes
    Job(JobArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Subcommand)]
pub enum VerifyCommand {
    /// Check a block of text for AI authorship (300+ characters)
    Text(TextArgs),
    /// Check an image or video reachable at a URL
    Url(UrlArgs),
    /// Upload a local image or video
    File(FileArgs),
}

#[derive(Args, Clone)]
pub struct TextArgs {
    /// Text to verify; use "-" to read stdin
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long)]
    pub file: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Clone)]
pub struct UrlArgs {
    /// URL of the image or video
    pub url: String,

    /// Verify as this media type instead of inferring it
    #[arg(long = "as", value_enum)]
    pub media: Option<MediaArg>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Clone)]
pub struct FileArgs {
    /// Path to the image or video
    pub path: String,

    /// Verify as this media type instead of inferring it
    #[arg(long = "as", value_enum)]
    pub media: Option<MediaArg>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Clone)]
pub struct JobArgs {
    /// Job ID returned by an earlier submission
    pub job_id: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct OutputArgs {
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Poll interval in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Maximum number of status checks before giving up
    #[arg(long)]
    pub max_attempts: Option<u32>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    #[arg(value_name = "CONFIG")]
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MediaArg {
    Image,
    Video,
}

impl From<MediaArg> for ContentType {
    fn from(arg: MediaArg) -> Self {
        match arg {
            MediaArg::Image => ContentType::Image,
            MediaArg::Video => ContentType::Video,
        }
    }
}
