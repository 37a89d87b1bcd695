use anyhow::{Context, Result, bail};
use fireems_ingest::ParseOptions;
use fireems_narrative::{NarrativeField, parse_field};
use fireems_standards::{list_tools, save_mapping_profile};

use fireems_cli::pipeline::{RunResult, SchemaSource, inspect, run, suggest, write_output};

use crate::cli::{InspectArgs, NarrativeArgs, RunArgs, SchemaArgs, SuggestArgs};
use crate::summary::{print_inspect, print_narrative, print_suggestions, print_tools};

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let limit = (args.sample > 0).then_some(args.sample);
    let options = ParseOptions::default().with_sample_limit(limit);
    let result = inspect(&args.file, &options)?;
    print_inspect(&result);
    Ok(())
}

pub fn run_suggest(args: &SuggestArgs) -> Result<()> {
    let source = schema_source(&args.schema)?;
    let result = suggest(&args.file, &source, args.min_confidence)?;
    print_suggestions(&result);
    if let Some(path) = &args.output {
        save_mapping_profile(path, &result.profile).context("save mapping profile")?;
        println!("Mapping profile: {}", path.display());
    }
    Ok(())
}

pub fn run_mapping(args: &RunArgs) -> Result<RunResult> {
    let source = schema_source(&args.schema)?;
    let result = run(&args.file, &source, &args.mapping)?;
    if let Some(path) = &args.output {
        write_output(path, &result.output)?;
    }
    Ok(result)
}

pub fn run_tools() -> Result<()> {
    let tools = list_tools().context("load built-in tools")?;
    print_tools(&tools);
    Ok(())
}

pub fn run_narrative(args: &NarrativeArgs) -> Result<()> {
    let fields: Vec<NarrativeField> = if args.fields.is_empty() {
        NarrativeField::ALL.to_vec()
    } else {
        args.fields
            .iter()
            .map(|id| id.parse::<NarrativeField>())
            .collect::<Result<_, _>>()?
    };
    let parsed: Vec<_> = fields
        .into_iter()
        .map(|field| (field, parse_field(&args.text, field)))
        .collect();
    print_narrative(&parsed);
    Ok(())
}

fn schema_source(args: &SchemaArgs) -> Result<SchemaSource> {
    match (&args.tool, &args.schema) {
        (Some(id), _) => Ok(SchemaSource::Tool(id.clone())),
        (None, Some(path)) => Ok(SchemaSource::File(path.clone())),
        (None, None) => bail!("either --tool or --schema is required"),
    }
}
