use crate::error::Result;
use crate::profiler::DatasetProfile;

/// Builds the recommendation request sent to the text-generation service.
pub fn build_prompt(profile: &DatasetProfile) -> Result<String> {
    let stats = serde_json::to_string_pretty(&profile.descriptive_stats)?;
    let samples = serde_json::to_string_pretty(&profile.sample_rows)?;

    let mut prompt = String::with_capacity(2048 + stats.len() + samples.len());
    prompt.push_str(
        "You are an expert data analyst specialising in data visualization. \
         Your job is to study a dataset and recommend between 3 and 5 specific charts \
         that bring out its most relevant patterns, relationships or insights.\n\n",
    );

    prompt.push_str("DATASET:\n");
    prompt.push_str(&format!(
        "- Shape: {} rows x {} columns\n",
        profile.row_count, profile.column_count
    ));
    prompt.push_str(&format!("- Columns: {}\n", profile.column_names.join(", ")));

    prompt.push_str("\nCOLUMNS:\n");
    for name in &profile.column_names {
        let dtype = profile.dtypes.get(name).map_or("unknown", String::as_str);
        let semantic = profile.column_type(name).map_or("unknown", |t| t.as_str());
        prompt.push_str(&format!("  - {name}: {dtype} ({semantic})\n"));
    }

    prompt.push_str(&format!("\nSTATISTICAL SUMMARY:\n{stats}\n"));
    prompt.push_str(&format!(
        "\nSAMPLE ROWS (first {}):\n{samples}\n",
        profile.sample_rows.len()
    ));

    prompt.push_str(
        "\nTASK:\n\
         Identify the most interesting trends, distributions, correlations or comparisons \
         in this dataset and recommend between 3 and 5 charts that show them clearly.\n\
         For each recommendation provide:\n\
         1. title: a short, descriptive chart title\n\
         2. chart_type: one of \"bar\", \"line\", \"pie\", \"scatter\"\n\
         3. parameters: the columns to plot, e.g. {\"x_axis\": \"Region\", \"y_axis\": \"Sales\"}; \
         a pie chart may give only {\"x_axis\": \"Region\"} to count rows per category\n\
         4. insight: one or two sentences on what the chart reveals and why it matters\n",
    );

    prompt.push_str(
        "\nOUTPUT FORMAT:\n\
         - Return ONLY a valid JSON array, with no commentary\n\
         - Every item must have exactly the fields title, chart_type, parameters, insight\n\
         - chart_type must be one of bar, line, pie, scatter\n\
         - x_axis and y_axis must be real column names from the dataset above\n\
         - y_axis is required for bar, line and scatter charts\n\
         - Return between 3 and 5 recommendations\n\n\
         Example:\n\
         [\n  {\n    \"title\": \"Sales by region\",\n    \"chart_type\": \"bar\",\n    \
         \"parameters\": {\"x_axis\": \"Region\", \"y_axis\": \"Sales\"},\n    \
         \"insight\": \"Shows clear differences in sales performance between regions.\"\n  }\n]\n",
    );

    tracing::debug!("Built recommendation prompt ({} chars)", prompt.len());
    Ok(prompt)
}
