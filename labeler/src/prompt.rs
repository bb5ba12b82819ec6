//! Terminal y/n prompts implementing the job decision callbacks.

use std::io::Write;

use crate::batch::BatchPlan;
use crate::checkpoint::Checkpoint;
use crate::printjob::JobObserver;

/// Interactive observer reading answers from stdin.
pub struct TerminalPrompt;

fn ask_yes_no(question: &str) -> bool {
    loop {
        print!("{question} [y/n] ");
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return true,
            "n" | "no" => return false,
            _ => println!("please answer y or n"),
        }
    }
}

impl JobObserver for TerminalPrompt {
    fn accept_resume(&mut self, checkpoint: &Checkpoint, _plan: &BatchPlan) -> bool {
        println!(
            "Found saved progress from {}: batch {}/{} completed (batch size {}).",
            checkpoint.timestamp,
            checkpoint.last_completed_batch + 1,
            checkpoint.total_batches,
            checkpoint.batch_size,
        );
        ask_yes_no("Resume from the next batch?")
    }

    fn confirm_start(&mut self, plan: &BatchPlan) -> bool {
        println!(
            "{} products, {} batches of up to {} ({} labels total).",
            plan.total_products,
            plan.total_batches(),
            plan.batch_size,
            plan.total_labels(),
        );
        ask_yes_no("Start printing?")
    }

    fn continue_after_error(&mut self, what: &str, error: &str) -> bool {
        println!("{what} failed: {error}");
        ask_yes_no("Continue with the next label?")
    }
}
