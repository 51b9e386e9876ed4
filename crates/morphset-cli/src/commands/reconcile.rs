//! Reconcile command
//!
//! Usage: morphset reconcile [--current <A,B,..>] [--target <X,Y,..>]
//!
//! Applies the same in-place edit observable lists use and prints what it
//! removed and appended.

use clap::Args;
use morphset_core::reconcile;

#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Comma-separated current contents
    #[arg(long, value_delimiter = ',')]
    pub current: Vec<String>,

    /// Comma-separated target contents
    #[arg(long, value_delimiter = ',')]
    pub target: Vec<String>,
}

/// Execute reconcile command
pub fn execute(args: ReconcileArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut current = args.current;
    let outcome = reconcile(&mut current, &args.target, |a, b| a == b);

    println!("removed: {}", outcome.removed);
    println!("appended: {}", outcome.appended);
    println!("result: {}", current.join(","));
    Ok(())
}
