#![allow(dead_code)]

use std::path::Path;

use itest_common::{access, ClassFileBuilder, JarBuilder, TempJar};
use jar_dumper::filter::FilterConfiguration;
use jar_dumper::pipeline::{self, PipelineOptions};

/// `com/ex/Foo` with a single `public static int bar(String, List)`
pub fn foo() -> ClassFileBuilder {
    ClassFileBuilder::new("com/ex/Foo")
        .method(access::PUBLIC, "<init>", "()V")
        .method(
            access::PUBLIC | access::STATIC,
            "bar",
            "(Ljava/lang/String;Ljava/util/List;)I",
        )
}

pub fn jar(classes: impl IntoIterator<Item = ClassFileBuilder>) -> TempJar {
    classes
        .into_iter()
        .fold(JarBuilder::new(), JarBuilder::class)
        .build()
}

/// Runs the pipeline over an archive, returning the lines written
pub fn dump(archive: &Path, options: PipelineOptions) -> Result<Vec<String>, jar_dumper::Error> {
    let mut out = vec![];
    pipeline::run(archive, &options, &mut out)?;
    let out = String::from_utf8(out).expect("output is utf-8");
    Ok(out.lines().map(str::to_string).collect())
}

pub fn filters(filters: FilterConfiguration) -> PipelineOptions {
    PipelineOptions {
        filters,
        ..Default::default()
    }
}
