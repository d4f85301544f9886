use std::path::PathBuf;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use cryptbreak::attacks::{self, TimingProbe, TokenAlgorithm};
use cryptbreak::config::{parse_config, AttackConfig};
use cryptbreak::errors::CrackError;
use cryptbreak::models::{Artifact, Ciphertext, Digest, EncodingHint, Findings, HashAlgorithm, Token};
use cryptbreak::reporting;
use cryptbreak::wordlist::parse_wordlist;

use super::commands::*;

/// Whether the command produced a result. `false` maps to a distinct exit code.
pub type Found = bool;

/// Settings shared by every handler.
pub struct Context {
    pub config: AttackConfig,
    pub json: bool,
}

impl Context {
    pub async fn load(config_path: Option<&str>, json: bool) -> Result<Self, CrackError> {
        let config = match config_path {
            Some(path) => {
                let file = parse_config(&PathBuf::from(path)).await?;
                info!(path, "Loaded configuration");
                AttackConfig::from_file_config(&file)
            }
            None => AttackConfig::default(),
        };
        Ok(Self { config, json })
    }

    fn emit<T, F>(&self, value: &T, text: F) -> Result<(), CrackError>
    where
        T: Serialize,
        F: FnOnce() -> String,
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print!("{}", text());
        }
        Ok(())
    }
}

async fn load_wordlist(path: &str) -> Result<Vec<String>, CrackError> {
    let content = tokio::fs::read_to_string(path).await?;
    let words = parse_wordlist(&content);
    if words.is_empty() {
        warn!(path, "Wordlist file has no entries");
    }
    Ok(words)
}

fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg} [{elapsed}]") {
        bar.set_style(spinner_style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

pub async fn handle_hash(ctx: Context, args: HashArgs) -> Result<Found, CrackError> {
    let hex = args.digest.trim();
    let algorithm = match &args.algorithm {
        Some(name) => name.parse::<HashAlgorithm>()?,
        None => HashAlgorithm::from_hex_len(hex.len()).ok_or_else(|| {
            CrackError::MalformedInput(format!(
                "Cannot infer algorithm from a {}-character digest; pass --algorithm",
                hex.len()
            ))
        })?,
    };
    let digest = Digest::from_hex(hex, algorithm)?;

    let mut config = ctx.config.clone();
    if let Some(path) = &args.wordlist {
        config.wordlist = load_wordlist(path).await?;
    }
    if let Some(v) = args.max_length {
        config.max_bruteforce_length = v;
    }
    if let Some(v) = &args.charset {
        config.charset = v.clone();
    }
    if args.max_attempts.is_some() {
        config.max_attempts = args.max_attempts;
    }
    if let Some(v) = args.threads {
        config.threads = v;
    }
    config.validate()?;

    let cancel = CancellationToken::new();
    let watchdog = {
        let cancel = cancel.clone();
        let timeout = args.timeout.map(Duration::from_secs);
        tokio::spawn(async move {
            let deadline = async {
                match timeout {
                    Some(t) => tokio::time::sleep(t).await,
                    None => std::future::pending::<()>().await,
                }
            };
            tokio::select! {
                _ = deadline => warn!("Time limit reached, stopping search"),
                _ = tokio::signal::ctrl_c() => warn!("Interrupted, stopping search"),
                _ = cancel.cancelled() => return,
            }
            cancel.cancel();
        })
    };

    let bar = (!ctx.json).then(|| spinner(format!("Cracking {} digest", algorithm)));
    let search_cancel = cancel.clone();
    let result = tokio::task::spawn_blocking(move || attacks::crack_with_cancel(&digest, &config, search_cancel))
        .await
        .map_err(|e| CrackError::Internal(format!("Search task failed: {}", e)))?;
    cancel.cancel();
    let _ = watchdog.await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let findings = Findings::Digest { preimage: result? };
    ctx.emit(&findings, || reporting::format_findings(&findings))?;
    Ok(findings.best().is_some())
}

pub async fn handle_cipher(ctx: Context, args: CipherArgs) -> Result<Found, CrackError> {
    let mut config = ctx.config.clone();
    if args.no_blocks {
        config.analyze_blocks = false;
    }
    let hint = args.encoding.parse::<EncodingHint>()?;
    let artifact = Artifact::Ciphertext(Ciphertext::new(args.ciphertext, hint));
    let findings = attacks::attack(&artifact, &config)?;

    if args.best {
        let best = findings.best().filter(|c| c.is_plausible());
        ctx.emit(&best, || match best {
            Some(c) => format!("{}\n", reporting::format_candidate(c)),
            None => "No plausible decoding.\n".to_string(),
        })?;
        return Ok(best.is_some());
    }

    ctx.emit(&findings, || reporting::format_findings(&findings))?;
    Ok(findings.best().map_or(false, |c| c.is_plausible()))
}

pub async fn handle_blocks(ctx: Context, args: BlocksArgs) -> Result<Found, CrackError> {
    let analysis = attacks::analyze_as(&args.ciphertext, args.encoding.parse::<EncodingHint>()?);
    ctx.emit(&analysis, || reporting::format_block_analysis(&analysis))?;
    Ok(true)
}

pub async fn handle_lcg(ctx: Context, args: LcgArgs) -> Result<Found, CrackError> {
    let mut config = ctx.config.clone();
    if let Some(count) = args.count {
        config.prediction_count = count;
    }
    let findings = attacks::attack(&Artifact::ObservedSequence(args.values), &config)?;
    ctx.emit(&findings, || reporting::format_findings(&findings))?;
    Ok(match &findings {
        Findings::ObservedSequence { prediction } => !prediction.values.is_empty(),
        _ => false,
    })
}

pub async fn handle_forge(ctx: Context, args: ForgeArgs) -> Result<Found, CrackError> {
    let payload = match serde_json::from_str::<Value>(&args.payload)? {
        Value::Object(map) => map,
        other => {
            return Err(CrackError::MalformedInput(format!(
                "Payload must be a JSON object, got {}",
                other
            )))
        }
    };

    let token = match &args.secret {
        Some(secret) => {
            let alg = args.alg.parse::<TokenAlgorithm>()?;
            attacks::sign_token(&payload, secret, alg)?
        }
        None => attacks::forge_none_algorithm(&payload)?,
    };

    ctx.emit(&json!({ "token": token }), || format!("{}\n", token))?;
    Ok(true)
}

pub async fn handle_jwt_crack(ctx: Context, args: JwtCrackArgs) -> Result<Found, CrackError> {
    let token = Token::parse(args.token.trim())?;
    let mut config = ctx.config.clone();
    if let Some(path) = &args.wordlist {
        config.secrets = load_wordlist(path).await?;
    }

    let findings = attacks::attack(&Artifact::Token(token), &config)?;
    ctx.emit(&findings, || reporting::format_findings(&findings))?;
    Ok(findings.best().is_some())
}

pub async fn handle_decode(ctx: Context, args: DecodeArgs) -> Result<Found, CrackError> {
    let decoded = attacks::decode_token(args.token.trim())?;
    let value = json!({ "header": decoded.header, "payload": decoded.payload });
    ctx.emit(&value, || {
        format!(
            "{} {}\n{} {}\n",
            style("header: ").bold(),
            value["header"],
            style("payload:").bold(),
            value["payload"]
        )
    })?;
    Ok(true)
}

pub async fn handle_challenge(ctx: Context, args: ChallengeArgs) -> Result<Found, CrackError> {
    let answer = attacks::solve_challenge(&args.question, args.allow_guess);
    ctx.emit(&answer, || match &answer {
        Some(c) => format!("{}\n", reporting::format_candidate(c)),
        None => "No answer.\n".to_string(),
    })?;
    Ok(answer.is_some())
}

/// Compares byte by byte and sleeps for every matching character.
fn leaky_compare(delay: Duration) -> impl FnMut(&str, &str) -> bool {
    move |candidate: &str, target: &str| {
        for (a, b) in candidate.chars().zip(target.chars()) {
            if a != b {
                return false;
            }
            std::thread::sleep(delay);
        }
        candidate.len() == target.len()
    }
}

pub async fn handle_timing_demo(ctx: Context, args: TimingDemoArgs) -> Result<Found, CrackError> {
    ctx.config.validate()?;
    let probe = TimingProbe::from_config(&ctx.config.timing)?;
    let delay = Duration::from_millis(args.delay_ms);
    let secret = args.secret;

    let bar = (!ctx.json).then(|| spinner("Probing simulated comparison".to_string()));
    let report = tokio::task::spawn_blocking(move || probe.run(leaky_compare(delay), &secret))
        .await
        .map_err(|e| CrackError::Internal(format!("Probe task failed: {}", e)))?;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    ctx.emit(&report, || reporting::format_probe_report(&report))?;
    Ok(!report.discovered.is_empty())
}

pub async fn handle_validate(args: ValidateArgs) -> Result<Found, CrackError> {
    let file = parse_config(&PathBuf::from(&args.config)).await?;
    AttackConfig::from_file_config(&file).validate()?;
    println!("Configuration is valid: {}", args.config);
    Ok(true)
}
