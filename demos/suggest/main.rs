//! Interactive demo: a form with one type-ahead field.
//!
//! Usage: `suggest-demo <endpoint-url> [minlength]`
//!
//! Logs go to `suggest-demo.log`; set `RUST_LOG` to change the filter.

use anyhow::{bail, Context, Result};
use bubbletea_rs::{quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, Program};
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::OnceLock;
use suggest_widget::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

static CONFIG: OnceLock<SuggestConfig> = OnceLock::new();

struct App {
    input: SuggestInput,
    status: String,
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let config = CONFIG.get().cloned().unwrap_or_default();
        let mut input = suggest_new(config);
        input.set_placeholder("start typing…");
        input.set_width(40);
        let cmd = input.focus();
        (
            Self {
                input,
                status: String::new(),
            },
            cmd,
        )
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if key_msg.modifiers.contains(KeyModifiers::CONTROL) {
                match key_msg.key {
                    KeyCode::Char('c') => return Some(quit()),
                    KeyCode::Char('s') => {
                        let (name, value) = self.input.form_field();
                        info!(name, value, "form submitted");
                        self.status = format!("submitted {name}={value}");
                        return None;
                    }
                    _ => {}
                }
            }
        }

        if let Some(failure) = msg.downcast_ref::<FetchErrMsg>() {
            self.status = format!("lookup for {:?} failed: {}", failure.term, failure.error);
        } else if msg.downcast_ref::<SuggestionsMsg>().is_some() {
            self.status.clear();
        }

        self.input.update(msg)
    }

    fn view(&self) -> String {
        let help: Vec<String> = self
            .input
            .key_map
            .short_help()
            .into_iter()
            .map(|b| format!("{} {}", b.help().key, b.help().desc))
            .collect();

        format!(
            "Pick a suggestion\n\n{}\n\n{}\n{} • ctrl+s submit • ctrl+c quit\n",
            self.input.view(),
            self.status,
            help.join(" • "),
        )
    }
}

fn parse_args() -> Result<SuggestConfig> {
    let mut args = std::env::args().skip(1);
    let Some(url) = args.next() else {
        bail!("usage: suggest-demo <endpoint-url> [minlength]");
    };

    let mut attributes = vec![("url".to_string(), url), ("name".to_string(), "choice".to_string())];
    if let Some(min) = args.next() {
        attributes.push(("minlength".to_string(), min));
    }

    let config = SuggestConfig::from_attributes(attributes)?;
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = parse_args()?;

    let file_appender = tracing_appender::rolling::never(".", "suggest-demo.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("suggest_widget=debug,info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    info!(url = ?config.url, "starting demo");
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("configuration already set"))?;

    let program = Program::<App>::builder()
        .alt_screen(true)
        .signal_handler(true)
        .build()
        .context("failed to build program")?;
    program.run().await.context("program failed")?;

    Ok(())
}
