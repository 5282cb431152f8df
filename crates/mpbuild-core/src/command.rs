//! Container command line synthesis.
//!
//! Pure string construction: nothing here touches the filesystem or
//! spawns a process. The same invocation and host always produce the
//! same command.

use std::fmt::Write as _;

use mpbuild_common::config::MpbuildConfig;

use crate::host::HostEnv;
use crate::invocation::{BuildInvocation, Target};

/// Marks every directory safe for git; the bind mount is owned by a uid
/// that may not exist inside the container.
const GIT_SAFE_DIRECTORY: &str = "git config --global --add safe.directory '*' 2> /dev/null;";

/// Step that builds the cross compiler before the firmware.
const MAKE_MPY_CROSS: &str = "make -C mpy-cross && ";

/// Returns the container command line that performs the invocation.
pub fn synthesize(invocation: &BuildInvocation, host: &HostEnv, config: &MpbuildConfig) -> String {
    let mpy_dir = host.mpy_root.display();
    let home = host.home.display();
    let (uid, gid) = if invocation.do_clean {
        (0, 0)
    } else {
        (host.uid, host.gid)
    };

    let mut cmd = format!("{} run --rm ", config.runtime);
    if config.interactive {
        cmd.push_str("-it ");
    }
    // USB access for deploy steps.
    cmd.push_str("-v /sys/bus:/sys/bus -v /dev:/dev --net=host --privileged ");
    // Same path inside and out so elf/map paths match the host.
    let _ = write!(cmd, "-v {mpy_dir}:{mpy_dir} -w {mpy_dir} ");
    let _ = write!(cmd, "--user {uid}:{gid} ");
    // Keeps HOME writable for a uid unknown to the container.
    let _ = write!(cmd, "-v {home}:{home} -e HOME={home} ");
    let _ = write!(cmd, "{} ", invocation.image);

    let _ = write!(
        cmd,
        "bash -c \"{GIT_SAFE_DIRECTORY}{}{}\"",
        prebuild_steps(invocation),
        make_command(invocation, host.nprocs)
    );

    tracing::debug!(command = %cmd, "synthesized container command");
    cmd
}

/// Cross compiler and submodule steps; empty for cleans and pass-through.
fn prebuild_steps(invocation: &BuildInvocation) -> String {
    if invocation.do_clean {
        return String::new();
    }
    match &invocation.target {
        Target::Board { .. } => format!(
            "{MAKE_MPY_CROSS}make -C {}{} submodules && ",
            invocation.make_path,
            board_vars(&invocation.target)
        ),
        Target::Passthrough => String::new(),
    }
}

/// The final `make` with job count, directory, board vars and extra args.
fn make_command(invocation: &BuildInvocation, nprocs: usize) -> String {
    let mut make = format!(
        "make -j {nprocs} -C {}{}",
        invocation.make_path,
        board_vars(&invocation.target)
    );
    for arg in &invocation.extra_args {
        make.push(' ');
        make.push_str(arg);
    }
    make
}

/// ` BOARD=<name>[ <VARIANT_PARAM>=<variant>]`, empty for pass-through.
fn board_vars(target: &Target) -> String {
    match target {
        Target::Board {
            name,
            variant,
            variant_param,
        } => {
            let mut vars = format!(" BOARD={name}");
            if let Some(variant) = variant {
                let _ = write!(vars, " {variant_param}={variant}");
            }
            vars
        }
        Target::Passthrough => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use mpbuild_common::types::{ImageRef, VariantParam};

    use super::*;

    fn host() -> HostEnv {
        HostEnv {
            uid: 1000,
            gid: 1001,
            home: PathBuf::from("/home/dev"),
            nprocs: 8,
            mpy_root: PathBuf::from("/src/micropython"),
        }
    }

    fn board_invocation(
        variant: Option<&str>,
        param: VariantParam,
        extra: &[&str],
    ) -> BuildInvocation {
        let extra_args: Vec<String> = extra.iter().map(|s| (*s).to_string()).collect();
        BuildInvocation {
            port: "stm32".into(),
            target: Target::Board {
                name: "PYBV11".into(),
                variant: variant.map(str::to_string),
                variant_param: param,
            },
            image: ImageRef::new("micropython/build-micropython-arm"),
            make_path: "ports/stm32".into(),
            do_clean: crate::invocation::is_clean(&extra_args),
            extra_args,
            deploy_file: None,
        }
    }

    #[test]
    fn build_command_is_exact() {
        let inv = board_invocation(Some("DP"), VariantParam::BoardVariant, &[]);
        let cmd = synthesize(&inv, &host(), &MpbuildConfig::default());
        assert_eq!(
            cmd,
            "docker run --rm -it -v /sys/bus:/sys/bus -v /dev:/dev --net=host --privileged \
             -v /src/micropython:/src/micropython -w /src/micropython --user 1000:1001 \
             -v /home/dev:/home/dev -e HOME=/home/dev micropython/build-micropython-arm \
             bash -c \"git config --global --add safe.directory '*' 2> /dev/null;\
             make -C mpy-cross && make -C ports/stm32 BOARD=PYBV11 BOARD_VARIANT=DP submodules && \
             make -j 8 -C ports/stm32 BOARD=PYBV11 BOARD_VARIANT=DP\""
        );
    }

    #[test]
    fn clean_runs_as_root_without_prebuild_steps() {
        let inv = board_invocation(None, VariantParam::BoardVariant, &["clean"]);
        let cmd = synthesize(&inv, &host(), &MpbuildConfig::default());
        assert!(cmd.contains("--user 0:0 "));
        assert!(!cmd.contains("1000:1001"));
        assert!(!cmd.contains("mpy-cross"));
        assert!(!cmd.contains("submodules"));
        assert!(cmd.ends_with("make -j 8 -C ports/stm32 BOARD=PYBV11 clean\""));
    }

    #[test]
    fn near_clean_tokens_build_as_host_user() {
        for token in ["Clean", "cleanup"] {
            let inv = board_invocation(None, VariantParam::BoardVariant, &[token]);
            let cmd = synthesize(&inv, &host(), &MpbuildConfig::default());
            assert!(cmd.contains("--user 1000:1001 "));
            assert!(cmd.contains("make -C mpy-cross && "));
        }
    }

    #[test]
    fn virtual_board_uses_variant_variable() {
        let inv = board_invocation(Some("coverage"), VariantParam::Variant, &[]);
        let cmd = synthesize(&inv, &host(), &MpbuildConfig::default());
        assert!(cmd.contains(" VARIANT=coverage"));
        assert!(!cmd.contains("BOARD_VARIANT"));
    }

    #[test]
    fn non_interactive_omits_tty_and_uses_configured_runtime() {
        let inv = board_invocation(None, VariantParam::BoardVariant, &[]);
        let config = MpbuildConfig {
            runtime: "podman".into(),
            interactive: false,
            ..MpbuildConfig::default()
        };
        let cmd = synthesize(&inv, &host(), &config);
        assert!(cmd.starts_with("podman run --rm -v /sys/bus:/sys/bus "));
        assert!(!cmd.contains("-it"));
    }

    #[test]
    fn extra_args_are_appended_verbatim() {
        let inv = board_invocation(None, VariantParam::BoardVariant, &["V=1", "deploy"]);
        let cmd = synthesize(&inv, &host(), &MpbuildConfig::default());
        assert!(cmd.ends_with("BOARD=PYBV11 V=1 deploy\""));
    }

    #[test]
    fn passthrough_has_no_board_vars_or_prebuild() {
        let inv = BuildInvocation {
            port: "esp32".into(),
            target: Target::Passthrough,
            image: ImageRef::new("espressif/idf:v5.2.2"),
            make_path: "ports/esp32/boards/GENERIC".into(),
            extra_args: vec!["V=1".into()],
            do_clean: false,
            deploy_file: None,
        };
        let cmd = synthesize(&inv, &host(), &MpbuildConfig::default());
        assert!(cmd.contains(" espressif/idf:v5.2.2 bash -c "));
        assert!(cmd.ends_with(
            "2> /dev/null;make -j 8 -C ports/esp32/boards/GENERIC V=1\""
        ));
        assert!(!cmd.contains("BOARD="));
    }
}
