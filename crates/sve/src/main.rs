//! sve - sign and verify self-contained signed messages

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use sve::{
    read_keypair, read_message, read_piped_message, read_public_key, write_keypair, HeaderStyle,
    KeyFiles, KeySource, Keypair, LineEndingPolicy, Pipeline, PipelineConfig, ProtocolConfig,
    SveError,
};
use tracing_subscriber::EnvFilter;

/// sve - Ed25519 signatures embedded in text messages
#[derive(Parser)]
#[command(name = "sve", version, about)]
struct Cli {
    /// Line ending canonicalization
    #[arg(long, value_enum, env = "SVE_LINE_ENDINGS", default_value = "normalize", global = true)]
    line_endings: LineEndings,

    /// Header names for the key and signature
    #[arg(long, value_enum, env = "SVE_HEADER_STYLE", default_value = "standard", global = true)]
    header_style: HeaderNaming,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a key pair into `pubkey` and `privkey`
    #[command(visible_alias = "gk")]
    GenKey {
        /// Directory to write the key files to
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Replace existing key files
        #[arg(long)]
        force: bool,
    },

    /// Sign standard input with a private key file, write to standard output
    #[command(visible_alias = "s")]
    Sign {
        /// Private key file
        private_key: PathBuf,
    },

    /// Verify a signed message on standard input
    #[command(visible_alias = "v")]
    Verify {
        /// Check against this public key file instead of the embedded key
        #[arg(long)]
        pubkey: Option<PathBuf>,

        /// Exit with status 1 when the signature is not valid
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LineEndings {
    /// Always rewrite line endings to CRLF
    Normalize,
    /// Keep input untouched if it already has a CRLF
    Legacy,
}

impl From<LineEndings> for LineEndingPolicy {
    fn from(value: LineEndings) -> Self {
        match value {
            LineEndings::Normalize => LineEndingPolicy::Normalize,
            LineEndings::Legacy => LineEndingPolicy::Legacy,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum HeaderNaming {
    /// Public-Key / Signature
    Standard,
    /// X-Ed25519-Pub / X-Ed25519-Sig
    #[value(name = "x-ed25519")]
    XEd25519,
}

impl From<HeaderNaming> for HeaderStyle {
    fn from(value: HeaderNaming) -> Self {
        match value {
            HeaderNaming::Standard => HeaderStyle::Standard,
            HeaderNaming::XEd25519 => HeaderStyle::XEd25519,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            let code = e
                .downcast_ref::<SveError>()
                .map(|e| e.category().exit_code())
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let protocol = ProtocolConfig {
        line_endings: cli.line_endings.into(),
        header_style: cli.header_style.into(),
    };

    match &cli.command {
        Commands::GenKey { dir, force } => cmd_gen_key(dir, *force),
        Commands::Sign { private_key } => cmd_sign(protocol, private_key),
        Commands::Verify { pubkey, strict } => cmd_verify(protocol, pubkey.as_deref(), *strict),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_gen_key(dir: &Path, force: bool) -> Result<ExitCode> {
    let files = KeyFiles::in_dir(dir);
    write_keypair(&files, &Keypair::generate(), force)?;
    let summary = format!(
        "Key pair generated and saved in {} and {}\n",
        files.public.display(),
        files.private.display()
    );
    write_stdout(summary.as_bytes())?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_sign(protocol: ProtocolConfig, private_key: &Path) -> Result<ExitCode> {
    // Key and input are fully read before any signing happens.
    let keypair = read_keypair(private_key)?;
    let input = read_message(io::stdin().lock())?;

    let pipeline = Pipeline::new(PipelineConfig {
        protocol,
        ..PipelineConfig::default()
    });
    let output = pipeline.sign(&keypair, &input);

    write_stdout(&output)?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_verify(protocol: ProtocolConfig, pubkey: Option<&Path>, strict: bool) -> Result<ExitCode> {
    let key_source = match pubkey {
        Some(path) => KeySource::Pinned(read_public_key(path)?),
        None => KeySource::Embedded,
    };

    let stdin = io::stdin();
    let input = read_piped_message(stdin.lock(), stdin.is_terminal())?;

    let pipeline = Pipeline::new(PipelineConfig {
        protocol,
        key_source,
    });
    let verification = pipeline.verify(&input)?;

    if verification.is_valid() {
        write_stdout(b"Signature is valid.\n")?;
        Ok(ExitCode::SUCCESS)
    } else {
        write_stdout(b"Signature is not valid.\n")?;
        Ok(if strict { ExitCode::FAILURE } else { ExitCode::SUCCESS })
    }
}

fn write_stdout(bytes: &[u8]) -> Result<(), SveError> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(bytes)
        .and_then(|()| stdout.flush())
        .map_err(SveError::Output)
}
