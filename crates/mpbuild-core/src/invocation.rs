//! The fully resolved description of one build attempt.

use std::path::PathBuf;

use mpbuild_common::constants::CLEAN_TARGET;
use mpbuild_common::error::Result;
use mpbuild_common::types::{ImageRef, VariantParam};

use crate::location::Location;
use crate::registry;
use crate::resolver::ResolvedBoard;

/// What the make invocation builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A catalog board, optionally with a variant.
    Board {
        /// Board name, passed as `BOARD=`.
        name: String,
        /// Variant name, if one was requested.
        variant: Option<String>,
        /// Make variable carrying the variant.
        variant_param: VariantParam,
    },
    /// Raw make arguments in a directory inferred from location context.
    Passthrough,
}

/// One build, clean or pass-through make attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInvocation {
    /// Port whose toolchain builds the target.
    pub port: String,
    /// Board or pass-through target.
    pub target: Target,
    /// Build container image.
    pub image: ImageRef,
    /// Directory handed to `make -C`, relative to the source tree root.
    pub make_path: String,
    /// Make arguments appended verbatim.
    pub extra_args: Vec<String>,
    /// True iff the first extra argument is exactly `clean`.
    pub do_clean: bool,
    /// Deploy instructions to show after a successful build.
    pub deploy_file: Option<PathBuf>,
}

/// Returns true iff the first argument is exactly the `clean` token.
pub fn is_clean(extra_args: &[String]) -> bool {
    extra_args.first().is_some_and(|a| a == CLEAN_TARGET)
}

impl BuildInvocation {
    /// Builds the invocation for a resolved catalog board.
    ///
    /// `image_override` replaces the registry's choice when set.
    ///
    /// # Errors
    ///
    /// Returns `MpbuildError::UnsupportedPort` if the port has no container
    /// and no override was given.
    pub fn for_board(
        resolved: &ResolvedBoard<'_>,
        extra_args: Vec<String>,
        image_override: Option<ImageRef>,
    ) -> Result<Self> {
        let port = &resolved.port.name;
        let variant = resolved.variant.map(|v| v.name.clone());
        let image = match image_override {
            Some(image) => image,
            None => registry::resolve_container(port, variant.as_deref())?,
        };

        Ok(Self {
            port: port.clone(),
            target: Target::Board {
                name: resolved.board.name.clone(),
                variant,
                variant_param: resolved.board.variant_param(),
            },
            image,
            make_path: format!("ports/{port}"),
            do_clean: is_clean(&extra_args),
            extra_args,
            deploy_file: resolved.board.deploy_filename().map(PathBuf::from),
        })
    }

    /// Builds the invocation for pass-through make mode.
    ///
    /// # Errors
    ///
    /// Returns `MpbuildError::UnsupportedPort` if the inferred port has no
    /// container.
    pub fn for_make(location: Location) -> Result<Self> {
        let image = registry::resolve_container(&location.port, None)?;
        Ok(Self {
            image,
            target: Target::Passthrough,
            do_clean: is_clean(&location.extra_args),
            port: location.port,
            make_path: location.make_path,
            extra_args: location.extra_args,
            deploy_file: None,
        })
    }

    /// Panel title describing the invocation.
    pub fn title(&self) -> String {
        match &self.target {
            Target::Board { name, variant, .. } => {
                let action = if self.do_clean { "Clean" } else { "Build" };
                let variant = variant
                    .as_ref()
                    .map_or_else(String::new, |v| format!(" ({v})"));
                format!("{action} {}/{name}{variant}", self.port)
            }
            Target::Passthrough => format!("Make Command: {} ({})", self.port, self.make_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn clean_only_for_exact_first_token() {
        assert!(is_clean(&args(&["clean"])));
        assert!(is_clean(&args(&["clean", "V=1"])));
        assert!(!is_clean(&args(&["Clean"])));
        assert!(!is_clean(&args(&["cleanup"])));
        assert!(!is_clean(&args(&[" clean"])));
        assert!(!is_clean(&args(&["V=1", "clean"])));
        assert!(!is_clean(&[]));
    }

    #[test]
    fn make_invocation_uses_registry() {
        let inv = BuildInvocation::for_make(Location {
            port: "rp2".into(),
            make_path: "ports/rp2".into(),
            extra_args: args(&["clean"]),
        })
        .expect("supported");
        assert_eq!(inv.image.as_str(), "micropython/build-micropython-arm:bookworm");
        assert!(inv.do_clean);
        assert_eq!(inv.title(), "Make Command: rp2 (ports/rp2)");
    }

    #[test]
    fn make_invocation_rejects_unsupported_port() {
        let err = BuildInvocation::for_make(Location {
            port: "zephyr".into(),
            make_path: "ports/zephyr".into(),
            extra_args: Vec::new(),
        })
        .unwrap_err();
        assert!(matches!(
            err,
            mpbuild_common::error::MpbuildError::UnsupportedPort { .. }
        ));
    }
}
