//! Interactive quarter-by-quarter session

use crate::prompt::Prompter;
use crate::report;
use anyhow::{Context, Result};
use hatchery_simulator_core::{Orchestrator, SimulationError};
use std::io::{BufRead, Write};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Completed,
    Bankrupt,
}

pub struct Session<'a, R, W> {
    orchestrator: &'a mut Orchestrator,
    prompter: &'a mut Prompter<R, W>,
    json: bool,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        orchestrator: &'a mut Orchestrator,
        prompter: &'a mut Prompter<R, W>,
        json: bool,
    ) -> Self {
        Self {
            orchestrator,
            prompter,
            json,
        }
    }

    /// Run every remaining quarter, or until bankruptcy
    pub fn run(&mut self) -> Result<SessionEnd> {
        while !self.orchestrator.is_over() {
            let quarter = self.orchestrator.begin_period()?;
            self.prompter
                .say(&format!("\n====== SIMULATING quarter {} ======", quarter))?;

            self.staffing()?;
            self.trading()?;

            let vendor = self.choose_vendor()?;
            let period = self.orchestrator.close_period(&vendor)?;
            self.prompter.say(&report::period(&period))?;
            if self.json {
                let json = serde_json::to_string_pretty(&period)
                    .context("failed to serialize period report")?;
                self.prompter.say(&json)?;
            }
        }

        Ok(if self.orchestrator.is_bankrupt() {
            SessionEnd::Bankrupt
        } else {
            SessionEnd::Completed
        })
    }

    fn staffing(&mut self) -> Result<()> {
        let (min, max) = {
            let config = self.orchestrator.config();
            (config.min_technicians as i64, config.max_technicians as i64)
        };

        let delta = loop {
            let current = self.orchestrator.state().roster().len() as i64;
            self.prompter
                .say(&format!("Current number of technicians: {}", current))?;
            let delta = self.prompter.ask_integer(
                "Enter number of technicians to add (+) or remove (-), or 0 for no change: ",
            )?;
            match current.checked_add(delta) {
                Some(total) if total < min => {
                    self.prompter.say(&format!(
                        "Cannot have less than {} technician(s). Please fill new input.",
                        min
                    ))?;
                }
                Some(total) if total <= max => break delta,
                // Out of range either way; the sign says which bound
                None if delta < 0 => {
                    self.prompter.say(&format!(
                        "Cannot have less than {} technician(s). Please fill new input.",
                        min
                    ))?;
                }
                _ => {
                    self.prompter.say(&format!(
                        "Cannot have more than {} technicians. Please fill new input.",
                        max
                    ))?;
                }
            }
        };

        if delta == 0 {
            return self.prompter.say("No change");
        }
        for _ in 0..delta.unsigned_abs() {
            if delta > 0 {
                self.hire_one()?;
            } else {
                self.dismiss_one()?;
            }
        }
        Ok(())
    }

    fn hire_one(&mut self) -> Result<()> {
        loop {
            let name = self
                .prompter
                .ask_non_empty("Enter technician name to add: ")?;
            let answer = self.prompter.ask(&format!(
                "Does {} have a speciality? If yes, enter the fish type, or press Enter for none: ",
                name
            ))?;
            let specialization = self.resolve_product(&answer);

            match self.orchestrator.hire(&name, specialization.as_deref()) {
                Ok(()) => {
                    return self.prompter.say(&format!("Added technician: {}", name));
                }
                Err(SimulationError::Staffing(err)) => self.prompter.say(&err.to_string())?,
                Err(other) => return Err(other.into()),
            }
        }
    }

    fn dismiss_one(&mut self) -> Result<()> {
        loop {
            let name = self
                .prompter
                .ask_non_empty("Enter technician name to remove: ")?;
            match self.orchestrator.dismiss(&name) {
                Ok(tech) => {
                    return self
                        .prompter
                        .say(&format!("Removed technician: {}", tech.name()));
                }
                Err(SimulationError::Staffing(err)) => self.prompter.say(&err.to_string())?,
                Err(other) => return Err(other.into()),
            }
        }
    }

    /// Catalog name matching `answer` ignoring case; blank means none
    ///
    /// An unmatched answer is passed through so the hire is rejected with
    /// the name the user typed.
    fn resolve_product(&self, answer: &str) -> Option<String> {
        if answer.is_empty() {
            return None;
        }
        let matched = self
            .orchestrator
            .state()
            .catalog()
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(answer))
            .map(|p| p.name().to_string());
        Some(matched.unwrap_or_else(|| answer.to_string()))
    }

    fn trading(&mut self) -> Result<()> {
        self.orchestrator.open_trading()?;
        self.prompter.say(&report::products(
            self.orchestrator.state(),
            self.orchestrator.labor(),
        ))?;

        loop {
            let product = self
                .prompter
                .ask("\nEnter fish name to sell (type 'done' to finish): ")?;
            if product.eq_ignore_ascii_case("done") {
                return Ok(());
            }
            let question = match self.orchestrator.state().catalog().demand(&product) {
                Some(demand) => format!("Enter quantity of {} to sell (max {}): ", product, demand),
                None => format!("Enter quantity of {} to sell: ", product),
            };
            let answer = self.prompter.ask(&question)?;
            let Ok(quantity) = answer.parse::<i64>() else {
                self.prompter
                    .say("Invalid input. Please enter a valid number.")?;
                continue;
            };

            match self.orchestrator.attempt_sale(&product, quantity) {
                Ok(receipt) => {
                    self.prompter.say(&report::receipt(&receipt))?;
                    self.prompter.say(&report::pool(self.orchestrator.state()))?;
                }
                Err(SimulationError::SaleRejected(rejection)) => {
                    self.prompter.say(&rejection.to_string())?;
                }
                Err(other) => return Err(other.into()),
            }
        }
    }

    /// Numbered vendor menu; anything else picks the second vendor
    fn choose_vendor(&mut self) -> Result<String> {
        let names: Vec<String> = self
            .orchestrator
            .state()
            .vendors()
            .iter()
            .map(|v| v.name().to_string())
            .collect();
        let menu = names
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{}. {}", i + 1, name))
            .collect::<Vec<_>>()
            .join(", ");

        let answer = self.prompter.ask(&format!("Choose a vendor: {}: ", menu))?;
        let fallback = names.len().min(2).saturating_sub(1);
        let index = answer
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=names.len()).contains(n))
            .map_or(fallback, |n| n - 1);
        names
            .get(index)
            .cloned()
            .context("no vendors configured")
    }
}
