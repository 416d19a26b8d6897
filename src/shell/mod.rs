//! Terminal front end - a thin line-oriented presentation layer over the core.
//!
//! Each input line is one operator action. The shell owns the database handle
//! and the order draft, runs the action to completion, and renders either the
//! result or the error. Errors never end the session.

/// Command handlers grouped by tab
pub mod commands;

use crate::{core::order::OrderDraft, errors::Result};
use sea_orm::DatabaseConnection;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Outcome of one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Lines to print
    Lines(Vec<String>),
    /// The operator asked to leave
    Quit,
}

/// Interactive session state.
pub struct Shell {
    db: DatabaseConnection,
    draft: OrderDraft,
}

impl Shell {
    /// Creates a session with an empty order draft.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            draft: OrderDraft::new(),
        }
    }

    /// The order lines staged in this session.
    #[must_use]
    pub const fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Executes one command line.
    ///
    /// # Errors
    /// Propagates the core error of the invoked operation.
    pub async fn execute(&mut self, line: &str) -> Result<Reply> {
        let tokens = tokenize(line);
        let words: Vec<&str> = tokens.iter().map(String::as_str).collect();
        let db = &self.db;

        let lines = match words.as_slice() {
            [] => Vec::new(),
            ["quit" | "exit"] => return Ok(Reply::Quit),
            ["help"] => vec![commands::HELP_TEXT.to_string()],

            ["users"] | ["user", "list"] => commands::list_users(db).await?,
            ["user", "add", args @ ..] => commands::add_user(db, args).await?,
            ["user", "delete", args @ ..] => commands::delete_user(db, args).await?,

            ["products"] | ["product", "list"] => commands::list_products(db).await?,
            ["product", "add", args @ ..] => commands::add_product(db, args).await?,
            ["product", "delete", args @ ..] => commands::delete_product(db, args).await?,

            ["order", "choices"] => commands::order_choices(db).await?,
            ["order", "stage", args @ ..] => commands::stage_line(&mut self.draft, args)?,
            ["order", "show"] => commands::show_draft(&self.draft),
            ["order", "remove", args @ ..] => commands::remove_line(&mut self.draft, args)?,
            ["order", "clear"] => {
                self.draft.clear();
                vec!["Staged lines cleared.".to_string()]
            }
            ["order", "place"] => commands::place_order(db, &mut self.draft).await?,
            ["orders"] => commands::list_orders(db).await?,

            ["payment", "record", args @ ..] => commands::record_payment(db, args).await?,
            ["payments"] | ["payment", "list"] => commands::list_payments(db).await?,

            _ => vec![
                format!("Unknown command: {line}"),
                commands::HELP_TEXT.to_string(),
            ],
        };
        Ok(Reply::Lines(lines))
    }

    /// Reads commands from `input` until end of input or `quit`.
    ///
    /// # Errors
    /// Returns an error only if reading input or writing output fails.
    pub async fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "Point of Sales Management System")?;
        writeln!(output, "Type 'help' for a list of commands.")?;

        for line in input.lines() {
            let line = line?;
            debug!(command = %line, "Executing command");
            match self.execute(&line).await {
                Ok(Reply::Quit) => break,
                Ok(Reply::Lines(lines)) => {
                    for text in lines {
                        writeln!(output, "{text}")?;
                    }
                }
                Err(e) => {
                    warn!(kind = %e.kind(), error = %e, "Command failed");
                    writeln!(output, "Error ({}): {e}", e.kind())?;
                }
            }
            output.flush()?;
        }
        Ok(())
    }
}

/// Splits a command line on whitespace, keeping double-quoted runs together.
pub(crate) fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if has_token {
        tokens.push(current);
    }
    tokens
}
