use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Serve newline-delimited JSON-RPC frames on stdin/stdout until EOF.
pub async fn run_stdio(global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Starting MCP server with stdio transport...");
        eprintln!();
    }

    let reader = tokio::io::BufReader::new(tokio::io::stdin());
    serve(reader, tokio::io::stdout(), &global).await
}

/// Answer every frame read from `reader` on `writer`, one response per line.
/// Blank lines and notifications produce no output.
async fn serve<R, W>(mut reader: R, mut writer: W, global: &crate::Global) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break; // EOF
        }

        let frame = line.trim();
        if frame.is_empty() {
            continue;
        }

        if global.verbose {
            eprintln!("Received: {frame}");
        }

        let Some(response) = super::handle_request(frame, global).await else {
            continue;
        };
        let response_json = serde_json::to_string(&response)?;

        if global.verbose {
            eprintln!("Sending: {response_json}");
        }

        writer.write_all(response_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    Ok(())
}
