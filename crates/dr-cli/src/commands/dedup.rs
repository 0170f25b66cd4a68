use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::Args;
use dr_core::config::DEFAULT_MAX_ITERATIONS;
use dr_dedup::{deduplicate_tokens, stabilize, ReductionKind};
use serde_json::json;

#[derive(Debug, Args)]
pub struct DedupArgs {
    /// Product name. Read from stdin when omitted.
    pub text: Option<String>,

    /// Pass cap for convergence
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Run exactly one pass and list each reduction
    #[arg(long)]
    pub single_pass: bool,

    /// Print a JSON report instead of the bare result
    #[arg(long)]
    pub json: bool,
}

impl DedupArgs {
    fn input(&self) -> Result<String> {
        match &self.text {
            Some(text) => Ok(text.clone()),
            None => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf).context("reading stdin")?;
                Ok(buf.trim_end_matches(['\n', '\r']).to_string())
            }
        }
    }

    pub fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let input = self.input()?;
        self.render(&input, out)
    }

    pub fn render(&self, input: &str, out: &mut dyn Write) -> Result<()> {
        if self.single_pass {
            let pass = deduplicate_tokens(input);
            let text = pass.text();
            if self.json {
                let reductions: Vec<_> = pass
                    .reductions
                    .iter()
                    .map(|r| {
                        json!({
                            "token": r.token,
                            "reducer": r.reducer,
                            "kind": match r.kind {
                                ReductionKind::Prefix => "prefix",
                                ReductionKind::Infix => "infix",
                            },
                            "result": r.result,
                        })
                    })
                    .collect();
                let report = json!({ "input": input, "output": text, "reductions": reductions });
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                writeln!(out, "{text}")?;
            }
            return Ok(());
        }

        let report = stabilize(input, self.max_iterations);
        if self.json {
            let value = json!({
                "input": input,
                "output": report.final_text,
                "changed": report.changed,
                "iterations": report.iterations,
                "hitLimit": report.hit_limit,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        } else {
            writeln!(out, "{}", report.final_text)?;
        }
        if report.hit_limit {
            tracing::warn!(iterations = report.iterations, "duplicates may remain");
        }
        Ok(())
    }
}
