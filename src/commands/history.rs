use anyhow::{Context, Result};

use sc_app::{ClearHistory, ListHistory, PasteError};
use sc_platform::TerminalPicker;

use crate::bootstrap::wiring::AppContext;

pub async fn list(ctx: &AppContext) -> Result<()> {
    let history = ctx.history().await?;
    for line in ListHistory::new(history).lines().await {
        println!("{line}");
    }
    Ok(())
}

pub async fn pick(ctx: &AppContext, index: Option<&str>) -> Result<()> {
    paste_by_index(ctx, index).await.context("pick error")
}

async fn paste_by_index(ctx: &AppContext, index: Option<&str>) -> Result<()> {
    let index = index.map(PasteError::parse_index).transpose()?;
    ctx.paste_entry().await?.execute(index).await?;
    Ok(())
}

pub async fn menu(ctx: &AppContext) -> Result<()> {
    paste_from_terminal(ctx).await.context("menu error")
}

async fn paste_from_terminal(ctx: &AppContext) -> Result<()> {
    let paste = ctx.paste_entry().await?;
    paste.execute_with_picker(&TerminalPicker::stdio()).await?;
    Ok(())
}

pub async fn popup(ctx: &AppContext) -> Result<()> {
    paste_from_dialog(ctx).await.context("popup error")
}

/// Closing the dialog is not an error.
async fn paste_from_dialog(ctx: &AppContext) -> Result<()> {
    let paste = ctx.paste_entry().await?;
    match paste.execute_with_picker(&ctx.dialog_picker()).await {
        Ok(_) | Err(PasteError::Canceled) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

pub async fn clear(ctx: &AppContext) -> Result<()> {
    ClearHistory::new(ctx.history().await?).execute().await;
    Ok(())
}
