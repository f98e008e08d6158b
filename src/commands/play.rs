//! Live match rounds: commit a hashed move, then reveal it.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::api::types::{CommitRequest, RevealRequest};
use crate::api::ArenaClient;
use crate::fairness;
use crate::strategy::Move;

/// Everything needed to reveal a commit later, plus the server's answer.
#[derive(Debug, Clone, Serialize)]
pub struct CommitReceipt {
    #[serde(rename = "move")]
    pub mv: Move,
    pub salt: String,
    pub hash: String,
    pub response: Value,
}

/// Commit `mv` for a round. A salt is generated when none is supplied.
pub async fn commit(
    client: &ArenaClient,
    key: &str,
    match_id: &str,
    round_no: u32,
    mv: Move,
    salt: Option<String>,
    prediction: Option<Move>,
) -> Result<CommitReceipt> {
    let salt = match salt {
        Some(salt) => {
            fairness::validate_salt(&salt).context("invalid --salt")?;
            salt
        }
        None => fairness::generate_salt(),
    };
    let hash = fairness::commit_hash(mv, &salt);
    debug!(match_id, round_no, %hash, "committing move");

    let req = CommitRequest {
        hash: hash.clone(),
        prediction,
    };
    let response = client.commit(key, match_id, round_no, &req).await?;

    Ok(CommitReceipt {
        mv,
        salt,
        hash,
        response,
    })
}

/// Reveal a committed move.
pub async fn reveal(
    client: &ArenaClient,
    key: &str,
    match_id: &str,
    round_no: u32,
    mv: Move,
    salt: String,
) -> Result<Value> {
    let req = RevealRequest { mv, salt };
    Ok(client.reveal(key, match_id, round_no, &req).await?)
}
