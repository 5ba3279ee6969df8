use crate::error::Result;
use crate::platform::{Platform, PlatformSet};
use crate::script::{ScriptKind, ScriptWriter};

/// One rendered script, not yet on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedScript {
    pub kind: ScriptKind,
    pub platform: Platform,
    pub file_name: String,
    pub content: String,
}

/// Ask `writer` for its `platform` flavour.
pub fn render(writer: &dyn ScriptWriter, platform: Platform) -> Result<String> {
    match platform {
        Platform::Linux => writer.linux(),
        Platform::Windows => writer.windows(),
    }
}

/// Render every (platform, writer) pair and hand each result to `sink`.
///
/// Platforms are visited in [`PlatformSet`] order and writers in slice order,
/// so the same input always produces the same sequence. Pairs where the
/// writer does not support the platform are skipped. The first error from a
/// writer or from `sink` stops the run.
pub fn dispatch<F>(
    platforms: &PlatformSet,
    writers: &[&dyn ScriptWriter],
    mut sink: F,
) -> Result<()>
where
    F: FnMut(RenderedScript) -> Result<()>,
{
    for platform in platforms.iter() {
        for writer in writers {
            let kind = writer.kind();
            if !writer.supports(platform) {
                tracing::debug!(script = %kind, platform = %platform, "skipping unsupported pair");
                continue;
            }

            tracing::debug!(script = %kind, platform = %platform, "rendering");
            let content = render(*writer, platform)?;
            sink(RenderedScript {
                kind,
                platform,
                file_name: kind.file_name(platform),
                content,
            })?;
        }
    }
    Ok(())
}
