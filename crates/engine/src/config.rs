/// Configuration for a render pass.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// When true, lookup misses and leftover tokens are logged at warn
    /// level instead of trace. Never changes render semantics.
    pub strict: bool,
}
