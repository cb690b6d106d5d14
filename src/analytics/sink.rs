/// 点击计数 Sink（聚合模式）
///
/// Receives drained `(code, count)` batches from the [`ClickManager`].
/// An `Err` return means nothing was applied; the manager restores the
/// batch into its buffer.
///
/// [`ClickManager`]: super::ClickManager
#[async_trait::async_trait]
pub trait ClickSink: Send + Sync {
    async fn flush_clicks(&self, updates: Vec<(String, usize)>) -> anyhow::Result<()>;
}
