//! Interactive chat loop over any async line reader / writer.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use dinebot::{OrderBot, RunError};

use super::Error;

/// `exit` / `quit` (any case) end the loop.
pub fn is_exit_command(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "exit" | "quit")
}

/// Reads lines from `input`, sends each to the bot as `user_id`, and writes
/// `Bot: <reply>` to `output`. Blank lines are skipped; EOF or an exit command
/// ends the loop. Returns the number of turns run.
pub async fn run_repl<R, W>(
    bot: &OrderBot,
    user_id: &str,
    input: R,
    mut output: W,
) -> Result<usize, Error>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut turns = 0;
    output.write_all(b"You: ").await?;
    output.flush().await?;
    while let Some(line) = lines.next_line().await? {
        if is_exit_command(&line) {
            break;
        }
        if !line.trim().is_empty() {
            let reply = match bot.chat(user_id, &line).await {
                Ok(state) => OrderBot::last_reply(&state).to_string(),
                Err(RunError::EmptyMessage) => String::new(),
                Err(e) => {
                    tracing::error!(error = %e, "turn failed");
                    format!("(error: {})", e)
                }
            };
            output.write_all(format!("Bot: {}\n", reply).as_bytes()).await?;
            turns += 1;
        }
        output.write_all(b"You: ").await?;
        output.flush().await?;
    }
    output.write_all(b"\nGoodbye!\n").await?;
    output.flush().await?;
    Ok(turns)
}
