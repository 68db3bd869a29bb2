// Copyright 2026 The Explorable Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use explorable_engine::bridge::{BridgeOptions, Outcome, apply_response};
use explorable_engine::common::format_number;
use explorable_engine::registry::{formulas, validate_registry};
use explorable_engine::render::render_svg;
use explorable_engine::store::VariableStore;
use explorable_tutor::session::SYSTEM_PROMPT;
use explorable_tutor::{ChatMessage, ReplySource, TutorConfig, TutorSession};

mod summary;

#[derive(Parser, Debug)]
#[command(name = "explorable", version, about = "Explore formulas and their tutor from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List formulas, their variables, and presets
    List {
        #[arg(long)]
        json: bool,
    },
    /// Evaluate a formula and print its readouts
    Show {
        #[command(flatten)]
        state: StateArgs,
        /// Print the store snapshot and model output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a formula as an SVG document
    Svg {
        #[command(flatten)]
        state: StateArgs,
        /// Path to write the SVG to (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Apply a saved assistant response to a formula
    Apply {
        #[command(flatten)]
        state: StateArgs,
        /// Response JSON file, or "-" for stdin
        response: PathBuf,
        #[command(flatten)]
        bridge: BridgeArgs,
        #[arg(long)]
        json: bool,
    },
    /// Ask the tutor a question and apply its reply
    Ask {
        #[command(flatten)]
        state: StateArgs,
        /// Ask about this variable, with its range and value as context
        #[arg(long)]
        variable: Option<String>,
        #[command(flatten)]
        bridge: BridgeArgs,
        /// Model name (overrides PRIMARY_MODEL)
        #[arg(long)]
        model: Option<String>,
        /// Seconds to wait for the backend
        #[arg(long)]
        timeout: Option<u64>,
        question: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct StateArgs {
    /// Formula id, e.g. quadratic or ideal-gas
    formula: String,
    /// Apply a preset before any --set
    #[arg(long)]
    preset: Option<String>,
    /// Override a variable; may be repeated
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, f64)>,
    /// Walkthrough step to focus
    #[arg(long)]
    step: Option<f64>,
}

#[derive(Args, Debug)]
struct BridgeArgs {
    /// Actually switch formulas on switchFormula calls
    #[arg(long)]
    follow_switch: bool,
    /// Actually restore defaults on reset calls
    #[arg(long)]
    honor_reset: bool,
}

impl From<&BridgeArgs> for BridgeOptions {
    fn from(args: &BridgeArgs) -> Self {
        BridgeOptions {
            follow_switch_formula: args.follow_switch,
            honor_reset: args.honor_reset,
        }
    }
}

fn parse_assignment(s: &str) -> std::result::Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in `{s}`"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number", value.trim()))?;
    if !value.is_finite() {
        return Err(format!("`{s}` is not a finite number"));
    }
    Ok((name.to_string(), value))
}

// Direct user input is not clamped, the same as a slider.  Values outside
// the declared range are accepted with a warning.
fn build_store(state: &StateArgs) -> Result<VariableStore> {
    let mut store = VariableStore::with_formula(&state.formula).map_err(|_| {
        let known: Vec<&str> = formulas().iter().map(|s| s.id).collect();
        anyhow!(
            "unknown formula `{}` (known: {})",
            state.formula,
            known.join(", ")
        )
    })?;
    if let Some(preset) = &state.preset {
        store
            .apply_preset(preset)
            .with_context(|| format!("no preset `{}` for {}", preset, store.formula_id()))?;
    }
    for (name, value) in &state.set {
        let spec = store
            .schema()
            .variable(name)
            .ok_or_else(|| anyhow!("{} has no variable named `{}`", store.formula_id(), name))?;
        if !spec.contains(*value) {
            warn!(
                variable = name.as_str(),
                value,
                min = spec.min,
                max = spec.max,
                "value is outside the slider range"
            );
        }
        store.set_variable(name, *value);
    }
    if let Some(step) = state.step {
        store.set_step(step);
    }
    Ok(store)
}

fn list(out: &mut impl Write, as_json: bool) -> Result<()> {
    if as_json {
        serde_json::to_writer_pretty(&mut *out, formulas())?;
        writeln!(out)?;
        return Ok(());
    }
    for schema in formulas() {
        writeln!(out, "{:<16}{}", schema.id, schema.title)?;
        for var in schema.variables {
            writeln!(
                out,
                "    {:<8}[{}, {}]  default {}  ({})",
                var.name,
                format_number(var.min),
                format_number(var.max),
                format_number(var.default),
                var.label
            )?;
        }
        if !schema.presets.is_empty() {
            let presets: Vec<&str> = schema.presets.iter().map(|p| p.id).collect();
            writeln!(out, "    presets: {}", presets.join(", "))?;
        }
    }
    Ok(())
}

fn show(out: &mut impl Write, store: &VariableStore, as_json: bool) -> Result<()> {
    let derived = store.evaluate();
    if as_json {
        let doc = json!({ "state": store.snapshot(), "derived": derived });
        serde_json::to_writer_pretty(&mut *out, &doc)?;
        writeln!(out)?;
        return Ok(());
    }
    writeln!(out, "{}", store.schema().title)?;
    writeln!(out, "  {}", VariableStore::describe_values(store.values()))?;
    for (label, value) in summary::readouts(&derived) {
        writeln!(out, "  {label}: {value}")?;
    }
    Ok(())
}

fn svg(out: &mut impl Write, store: &VariableStore, output: Option<&Path>) -> Result<()> {
    let doc = render_svg(&store.evaluate());
    match output {
        Some(path) => {
            fs::write(path, doc).with_context(|| format!("failed to write {}", path.display()))?
        }
        None => writeln!(out, "{doc}")?,
    }
    Ok(())
}

fn read_response(path: &Path) -> Result<Value> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&text).context("response is not valid JSON")
}

fn print_outcomes(out: &mut impl Write, outcomes: &[Outcome]) -> io::Result<()> {
    for outcome in outcomes {
        match outcome {
            Outcome::Applied { message, .. } => writeln!(out, "  applied   {message}")?,
            Outcome::Informational { message, .. } => writeln!(out, "  noted     {message}")?,
            Outcome::NoOp { tool } => writeln!(out, "  no change {tool}")?,
            Outcome::Rejected { tool, rejection } => {
                writeln!(out, "  rejected  {tool}: {rejection}")?
            }
            Outcome::Ignored { tool } => writeln!(out, "  ignored   {tool}")?,
        }
    }
    Ok(())
}

fn apply(
    out: &mut impl Write,
    mut store: VariableStore,
    response: &Path,
    options: BridgeOptions,
    as_json: bool,
) -> Result<()> {
    let raw = read_response(response)?;
    let report = apply_response(&mut store, &raw, options)?;
    if as_json {
        let doc = json!({
            "content": report.content,
            "applied": report.applied,
            "state": store.snapshot(),
        });
        serde_json::to_writer_pretty(&mut *out, &doc)?;
        writeln!(out)?;
        return Ok(());
    }
    if let Some(content) = &report.content {
        writeln!(out, "{content}")?;
    }
    print_outcomes(out, &report.outcomes)?;
    show(out, &store, false)
}

async fn ask(
    out: &mut impl Write,
    store: VariableStore,
    variable: Option<&str>,
    question: &str,
    config: TutorConfig,
    options: BridgeOptions,
) -> Result<()> {
    let session = TutorSession::from_config(config, store)?.with_options(options);
    let question = Some(question).filter(|q| !q.trim().is_empty());
    let answer = match (variable, question) {
        (Some(variable), question) => session.ask_about_variable(variable, question).await?,
        (None, Some(question)) => {
            let messages = [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(question)];
            session.ask(&messages).await
        }
        (None, None) => bail!("nothing to ask: pass a question or --variable"),
    };

    match &answer.source {
        ReplySource::Backend => {}
        ReplySource::Mock => eprintln!("(mock mode: no tutor backend configured)"),
        ReplySource::Fallback { reason } => eprintln!("(tutor unavailable: {reason})"),
    }
    writeln!(out, "{}", answer.text)?;
    print_outcomes(out, &answer.report.outcomes)?;
    let store = session.store();
    let store = store.lock().map_err(|_| anyhow!("store lock poisoned"))?;
    show(out, &store, false)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries JSON and SVG; logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    validate_registry()?;

    let mut stdout = io::stdout().lock();
    match &cli.command {
        Command::List { json } => list(&mut stdout, *json),
        Command::Show { state, json } => show(&mut stdout, &build_store(state)?, *json),
        Command::Svg { state, output } => {
            svg(&mut stdout, &build_store(state)?, output.as_deref())
        }
        Command::Apply {
            state,
            response,
            bridge,
            json,
        } => apply(&mut stdout, build_store(state)?, response, bridge.into(), *json),
        Command::Ask {
            state,
            variable,
            bridge,
            model,
            timeout,
            question,
        } => {
            let mut config = TutorConfig::from_env();
            if let Some(model) = model {
                config = config.with_model(model);
            }
            if let Some(secs) = timeout.filter(|s| *s > 0) {
                config = config.with_timeout(Duration::from_secs(secs));
            }
            let store = build_store(state)?;
            ask(
                &mut stdout,
                store,
                variable.as_deref(),
                &question.join(" "),
                config,
                bridge.into(),
            )
            .await
        }
    }
}
