use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::activity::aggregate_push_events;
use crate::github::ProfileSource;
use crate::models::DailyCommitCount;
use crate::state::{AnalysisState, Phase, SharedState};

/// Run one analyze cycle for the username currently held in `state`.
///
/// Does nothing when the username is empty. Returns whether a cycle ran.
pub async fn analyze<S: ProfileSource>(source: &S, state: &SharedState) -> bool {
    let username = state.lock().await.username().to_string();
    if username.is_empty() {
        tracing::debug!("empty username, nothing to analyze");
        return false;
    }
    analyze_user(source, state, username).await;
    true
}

/// Take `input` as the typed username (trimmed) and analyze it.
pub async fn submit<S: ProfileSource>(source: &S, state: &SharedState, input: &str) -> bool {
    state.lock().await.set_username(input.trim());
    analyze(source, state).await
}

/// One submission per line of `reader`. Blank lines do nothing.
///
/// `present` sees the state after every cycle that ran. Returns the number of
/// cycles.
pub async fn analyze_lines<R, S, F>(
    reader: R,
    source: &S,
    state: &SharedState,
    mut present: F,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    S: ProfileSource,
    F: FnMut(&AnalysisState) -> Result<()>,
{
    let mut lines = reader.lines();
    let mut cycles = 0;
    while let Some(line) = lines.next_line().await.context("Failed to read input line")? {
        if submit(source, state, &line).await {
            cycles += 1;
            present(&*state.lock().await)?;
        }
    }
    Ok(cycles)
}

/// Repository fetch, then activity fetch, both for the same `username`.
///
/// Failures are logged and never returned. A failed repository fetch empties
/// the list; a failed activity fetch leaves the previous commit series alone.
/// Overlapping cycles are not cancelled: whichever writes last wins.
pub async fn analyze_user<S: ProfileSource>(source: &S, state: &SharedState, username: String) {
    {
        let mut s = state.lock().await;
        s.set_loading(true);
        s.set_phase(Phase::Loading);
    }

    let repos = match source.fetch_repos(&username).await {
        Ok(repos) => Some(repos),
        Err(e) => {
            tracing::error!(username, "repository fetch failed: {e:#}");
            None
        }
    };

    {
        let mut s = state.lock().await;
        let ok = repos.is_some();
        s.set_repos(repos.unwrap_or_default());
        s.set_loading(false);
        if ok {
            s.set_phase(Phase::ReposLoaded);
        }
    }

    state.lock().await.set_phase(Phase::ActivityFetching);

    match fetch_activity(source, &username).await {
        Ok(commits) => state.lock().await.set_commits(commits),
        Err(e) => tracing::error!(username, "activity fetch failed: {e:#}"),
    }

    state.lock().await.set_phase(Phase::Done);
    tracing::info!(username, "analysis complete");
}

async fn fetch_activity<S: ProfileSource>(
    source: &S,
    username: &str,
) -> Result<Vec<DailyCommitCount>> {
    let events = source.fetch_events(username).await?;
    let commits = aggregate_push_events(&events).context("Unexpected event stream response")?;
    Ok(commits)
}
