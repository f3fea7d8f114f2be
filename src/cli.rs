//! Command line arguments. Flags are written with a single dash, `-skipStatic`, though the
//! double dash spelling works too.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, CommandFactory, Parser};

use crate::filter::FilterConfiguration;
use crate::pipeline::PipelineOptions;

/// Prints the public method signatures of every class in a jar, one per line, sorted by class name
#[derive(Debug, Parser)]
#[command(name = "jar-dumper", disable_help_flag = true)]
pub struct Cli {
    /// The jar, zip, or directory of class files to read
    #[arg(allow_hyphen_values = true)]
    pub archive: PathBuf,

    /// Skip static methods
    #[arg(long = "skipStatic")]
    pub skip_static: bool,
    /// Skip methods that aren't static
    #[arg(long = "skipNonStatic")]
    pub skip_non_static: bool,
    /// Skip final methods
    #[arg(long = "skipFinal")]
    pub skip_final: bool,
    /// Skip native methods
    #[arg(long = "skipNative")]
    pub skip_native: bool,
    /// Skip compiler generated methods
    #[arg(long = "skipSynthetic")]
    pub skip_synthetic: bool,
    /// Skip methods that take a variable number of arguments
    #[arg(long = "skipVarargs")]
    pub skip_varargs: bool,
    /// Skip bridge methods
    #[arg(long = "skipBridge")]
    pub skip_bridge: bool,
    /// Skip volatile methods (the same bit as bridge)
    #[arg(long = "skipVolatile")]
    pub skip_volatile: bool,
    /// Skip transient methods (the same bit as varargs)
    #[arg(long = "skipTransient")]
    pub skip_transient: bool,
    /// Skip every method declared by an interface
    #[arg(long = "skipInterface")]
    pub skip_interface: bool,
    /// Skip abstract methods
    #[arg(long = "skipAbstract")]
    pub skip_abstract: bool,
    /// Skip methods with a parameter that's an interface or an abstract class
    #[arg(long = "skipMethodsWithNonConcreteParams")]
    pub skip_methods_with_non_concrete_params: bool,
    /// Print each method's modifiers before its return type
    #[arg(long = "showModifiers")]
    pub show_modifiers: bool,
    /// Only print the methods a class declares, not the ones it inherits from the archive
    #[arg(long = "declaredOnly")]
    pub declared_only: bool,
    /// Log what's going on to stderr
    #[arg(long)]
    pub verbose: bool,
}

/// What the command line asked for
#[derive(Debug)]
pub enum Invocation {
    /// Dump an archive
    Run(Cli),
    /// Print usage and stop
    Help,
}

impl Cli {
    pub fn filters(&self) -> FilterConfiguration {
        FilterConfiguration {
            skip_static: self.skip_static,
            skip_non_static: self.skip_non_static,
            skip_final: self.skip_final,
            skip_native: self.skip_native,
            skip_synthetic: self.skip_synthetic,
            skip_varargs: self.skip_varargs,
            skip_bridge: self.skip_bridge,
            skip_volatile: self.skip_volatile,
            skip_transient: self.skip_transient,
            skip_interface: self.skip_interface,
            skip_abstract: self.skip_abstract,
            skip_methods_with_non_concrete_params: self.skip_methods_with_non_concrete_params,
            show_modifiers: self.show_modifiers,
        }
    }

    pub fn options(&self) -> PipelineOptions {
        PipelineOptions {
            filters: self.filters(),
            declared_only: self.declared_only,
        }
    }
}

/// Rewrites single dash long flags, `-skipStatic`, into the `--skipStatic` form clap expects.
/// Only known flag names are rewritten, so a path like `-lib.jar` stays a path. The program name
/// and anything after a `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let command = Cli::command();
    let flags = command
        .get_arguments()
        .filter_map(Arg::get_long)
        .collect::<Vec<_>>();
    let mut literal = false;
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(position, arg)| {
            if position == 0 || literal {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    literal = true;
                    arg
                }
                Some(flag)
                    if flag
                        .strip_prefix('-')
                        .filter(|name| !name.starts_with('-'))
                        .map_or(false, |name| flags.contains(&name)) =>
                {
                    OsString::from(format!("-{flag}"))
                }
                _ => arg,
            }
        })
        .collect()
}

fn is_help(arg: &OsString) -> bool {
    arg == "-h" || arg == "--help"
}

/// Parses the command line, program name first. A help flag anywhere wins over everything else.
pub fn parse_args<I, T>(args: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args = normalize_args(args);
    let literal = args.iter().position(|arg| arg == "--").unwrap_or(args.len());
    if args.iter().take(literal).skip(1).any(is_help) {
        return Ok(Invocation::Help);
    }
    Cli::try_parse_from(args).map(Invocation::Run)
}

/// The long usage text
pub fn usage() -> String {
    Cli::command().render_long_help().to_string()
}
