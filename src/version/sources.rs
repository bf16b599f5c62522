use super::{NodeVersionSource, ResolveContext};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Location of the server boot script inside the output directory
pub const BOOT_SCRIPT_PATH: &str = "bundle/programs/server/boot.js";

/// `node_version` option, taken verbatim
pub struct OverrideSource;

impl NodeVersionSource for OverrideSource {
    fn name(&self) -> &str {
        "override"
    }

    fn find(&self, ctx: &ResolveContext<'_>) -> Option<String> {
        ctx.options
            .node_version
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

/// `engines.node` from the project's package.json
pub struct PackageJsonSource;

impl PackageJsonSource {
    fn engines_node(content: &str) -> Option<String> {
        let manifest: Value = serde_json::from_str(content).ok()?;
        manifest
            .get("engines")?
            .get("node")?
            .as_str()
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

impl NodeVersionSource for PackageJsonSource {
    fn name(&self) -> &str {
        "package.json"
    }

    fn find(&self, ctx: &ResolveContext<'_>) -> Option<String> {
        let path = ctx.options.input.join("package.json");
        let content = match ctx.fs.read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping unreadable package.json");
                return None;
            }
        };

        let version = Self::engines_node(&content);
        if version.is_none() {
            trace!(path = %path.display(), "package.json has no engines.node");
        }
        version
    }
}

/// `MIN_NODE_VERSION` constant in the bundled server's boot script
pub struct BootScriptSource;

impl BootScriptSource {
    fn min_node_version(content: &str) -> Option<String> {
        static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
        let re = PATTERN
            .get_or_init(|| {
                Regex::new(r#"MIN_NODE_VERSION\s*=\s*(?:'v([^']+)'|"v([^"]+)")"#).ok()
            })
            .as_ref()?;

        let caps = re.captures(content)?;
        let version = caps.get(1).or_else(|| caps.get(2))?;
        Some(version.as_str().to_string())
    }
}

impl NodeVersionSource for BootScriptSource {
    fn name(&self) -> &str {
        "boot.js"
    }

    fn find(&self, ctx: &ResolveContext<'_>) -> Option<String> {
        let path = ctx.output_dir.join(BOOT_SCRIPT_PATH);
        match ctx.fs.read_to_string(&path) {
            Ok(content) => Self::min_node_version(&content),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping unreadable boot script");
                None
            }
        }
    }
}
