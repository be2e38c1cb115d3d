// Interactive console session
//
// All prompt/read logic is generic over BufRead/Write so tests can drive a
// whole session from a scripted byte buffer. Validation itself lives in
// validation.rs; this layer only loops, retries and prints.
//
// Invalid answers are retried up to MAX_INPUT_ATTEMPTS, then the current
// operation is abandoned and the session returns to the menu. EOF on the
// input ends the session like a quit.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::fields::{ids, FieldCatalog, FieldSpec};
use crate::portfolio::Portfolio;
use crate::registry::{FieldAnswers, ListingRegistry};
use crate::validation::{validate_index, InvalidInputError, MAX_INPUT_ATTEMPTS};

/// Top-level menu commands.
pub const MENU_OPTIONS: &[&str] = &["add", "list", "remove", "clear", "quit"];

// ============================================================================
// PROMPTER
// ============================================================================

/// Reads answers and writes prompts over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Print a full line.
    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line).context("failed to write to console")?;
        Ok(())
    }

    /// Print the prompt (no newline) and read one answer line.
    ///
    /// Returns None once the input is closed.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt).context("failed to write prompt")?;
        self.output.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;

        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompt for a field, retrying invalid answers.
    ///
    /// Ok(None) means the input closed; an exhausted retry budget surfaces
    /// as an AttemptsExhausted error the caller can treat as non-fatal.
    pub fn prompt_field(&mut self, spec: &FieldSpec) -> Result<Option<String>> {
        let prompt = spec.prompt_line();

        for _ in 0..MAX_INPUT_ATTEMPTS {
            let raw = match self.ask(&prompt)? {
                Some(raw) => raw,
                None => return Ok(None),
            };

            match spec.validate(&raw) {
                Ok(answer) => return Ok(Some(answer)),
                Err(err) => self.say(&format!("Invalid input: {}", err))?,
            }
        }

        Err(InvalidInputError::AttemptsExhausted {
            attempts: MAX_INPUT_ATTEMPTS,
        }
        .into())
    }

    /// Prompt for a 1-based index into a list of `len` items, retrying
    /// invalid answers.
    pub fn prompt_index(&mut self, prompt: &str, len: usize) -> Result<Option<usize>> {
        for _ in 0..MAX_INPUT_ATTEMPTS {
            let raw = match self.ask(prompt)? {
                Some(raw) => raw,
                None => return Ok(None),
            };

            match validate_index(&raw, len) {
                Ok(index) => return Ok(Some(index)),
                Err(err) => self.say(&format!("Invalid input: {}", err))?,
            }
        }

        Err(InvalidInputError::AttemptsExhausted {
            attempts: MAX_INPUT_ATTEMPTS,
        }
        .into())
    }
}

/// True when the error is an abandoned prompt, not a real failure.
fn attempts_exhausted(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<InvalidInputError>(),
        Some(InvalidInputError::AttemptsExhausted { .. })
    )
}

// ============================================================================
// SESSION
// ============================================================================

/// One interactive operator session over a portfolio.
pub struct ConsoleSession<R, W> {
    prompter: Prompter<R, W>,
    registry: ListingRegistry,
    catalog: FieldCatalog,
    portfolio: Portfolio,
}

impl<R: BufRead, W: Write> ConsoleSession<R, W> {
    pub fn new(input: R, output: W, portfolio: Portfolio) -> Self {
        ConsoleSession {
            prompter: Prompter::new(input, output),
            registry: ListingRegistry::new(),
            catalog: FieldCatalog::new(),
            portfolio,
        }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Hand the portfolio back when the session is over.
    pub fn into_portfolio(self) -> Portfolio {
        self.portfolio
    }

    /// Run the menu loop until quit or end of input.
    pub fn run(&mut self) -> Result<()> {
        let menu = FieldSpec::choice("field:menu", "What would you like to do?", MENU_OPTIONS);

        loop {
            let command = match self.prompter.prompt_field(&menu) {
                Ok(Some(command)) => command,
                // Input closed: treat like quit.
                Ok(None) => break,
                Err(err) if attempts_exhausted(&err) => {
                    self.prompter.say("Too many invalid answers, closing.")?;
                    break;
                }
                Err(err) => return Err(err),
            };

            match command.as_str() {
                "add" => self.add_listing()?,
                "list" => self.list_listings()?,
                "remove" => self.remove_listing()?,
                "clear" => self.clear_listings()?,
                "quit" => break,
                _ => unreachable!("menu answers are validated"),
            }
        }

        Ok(())
    }

    /// Prompt through one blueprint form and record the listing.
    fn add_listing(&mut self) -> Result<()> {
        let blueprint = {
            let kind_spec = self
                .catalog
                .get(ids::PROPERTY_KIND)
                .context("property kind field missing from catalog")?
                .clone();
            let tx_spec = self
                .catalog
                .get(ids::TRANSACTION_KIND)
                .context("transaction kind field missing from catalog")?
                .clone();

            let kind = match self.prompt_or_abandon(&kind_spec)? {
                Some(answer) => answer,
                None => return Ok(()),
            };
            let transaction = match self.prompt_or_abandon(&tx_spec)? {
                Some(answer) => answer,
                None => return Ok(()),
            };

            // Both answers are canonical options, so the registry lookup
            // cannot miss.
            *self
                .registry
                .resolve(&kind, &transaction)
                .map_err(anyhow::Error::from)?
        };

        let mut answers = FieldAnswers::new();
        for field_id in blueprint.field_plan() {
            let spec = self
                .catalog
                .get(field_id)
                .with_context(|| format!("field {} missing from catalog", field_id))?
                .clone();

            match self.prompt_or_abandon(&spec)? {
                Some(answer) => {
                    answers.insert(field_id.to_string(), answer);
                }
                None => return Ok(()),
            }
        }

        let listing = blueprint.build(&answers)?;
        let label = listing.label();
        self.portfolio.add(listing);
        self.prompter
            .say(&format!("Listing recorded: {}.", label))?;

        Ok(())
    }

    /// Prompt for one field; None means the answer was abandoned (retries
    /// exhausted or input closed) and the current operation should stop.
    fn prompt_or_abandon(&mut self, spec: &FieldSpec) -> Result<Option<String>> {
        match self.prompter.prompt_field(spec) {
            Ok(Some(answer)) => Ok(Some(answer)),
            Ok(None) => Ok(None),
            Err(err) if attempts_exhausted(&err) => {
                self.prompter.say("Abandoned: too many invalid answers.")?;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Print every listing in display order.
    fn list_listings(&mut self) -> Result<()> {
        if self.portfolio.is_empty() {
            self.prompter.say("No properties recorded yet.")?;
            return Ok(());
        }

        self.prompter.say("Here are all the properties:")?;
        self.prompter.say("")?;
        for line in self.portfolio.numbered_display_lines() {
            self.prompter.say(&line)?;
        }

        Ok(())
    }

    /// Show the numbered portfolio, then remove one listing by index.
    fn remove_listing(&mut self) -> Result<()> {
        if self.portfolio.is_empty() {
            self.prompter.say("No properties to remove.")?;
            return Ok(());
        }

        self.prompter.say("Here are all the properties:")?;
        self.prompter.say("")?;
        for line in self.portfolio.numbered_display_lines() {
            self.prompter.say(&line)?;
        }

        let len = self.portfolio.len();
        let index = match self
            .prompter
            .prompt_index("Choose property to remove: ", len)
        {
            Ok(Some(index)) => index,
            Ok(None) => return Ok(()),
            Err(err) if attempts_exhausted(&err) => {
                self.prompter.say("Abandoned: too many invalid answers.")?;
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        // The index was validated against the current length.
        let removed = self
            .portfolio
            .remove(index)
            .context("validated index disappeared")?;
        self.prompter.say(&format!(
            "Removed property number {} ({}).",
            index,
            removed.label()
        ))?;

        Ok(())
    }

    /// Drop the whole portfolio after a confirmation.
    fn clear_listings(&mut self) -> Result<()> {
        if self.portfolio.is_empty() {
            self.prompter.say("Nothing to clear.")?;
            return Ok(());
        }

        let confirm = FieldSpec::choice(
            "field:confirm_clear",
            "This removes every listing. Continue?",
            &["yes", "no"],
        );

        match self.prompt_or_abandon(&confirm)? {
            Some(answer) if answer == "yes" => {
                let dropped = self.portfolio.clear();
                self.prompter
                    .say(&format!("Cleared {} listings.", dropped))?;
            }
            Some(_) => self.prompter.say("Kept all listings.")?,
            None => {}
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
