//! HTML page rendering
//!
//! Every endpoint renders the same page: the upload and manual-entry forms,
//! followed by whatever result tables and charts the request produced.

use forecast_facade::ForecastRecord;
use predictor_facade::PredictionRecord;
use std::fmt::Write;

/// Fields of the manual entry form, in display order
const NUMERIC_INPUTS: [(&str, &str); 9] = [
    ("Store_id", "1"),
    ("Holiday", "0"),
    ("Orders", "0"),
    ("Year", "2019"),
    ("Month", "1"),
    ("Week", "1"),
    ("Day", "1"),
    ("DayOfWeek", "0"),
    ("Is_Weekend", "0"),
];

const CATEGORY_INPUTS: [(&str, &[&str]); 4] = [
    ("Store_Type", &["S1", "S2", "S3", "S4"]),
    ("Location_Type", &["L1", "L2", "L3", "L4", "L5"]),
    ("Region_Code", &["R1", "R2", "R3", "R4"]),
    ("Discount", &["No", "Yes"]),
];

/// A header row plus body cells, already formatted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Input columns followed by `Predicted_Sales`
    pub fn from_predictions(records: &[PredictionRecord]) -> Self {
        Self {
            headers: records.first().map(|r| r.columns()).unwrap_or_default(),
            rows: records.iter().map(|r| r.values()).collect(),
        }
    }

    pub fn from_forecast(records: &[ForecastRecord]) -> Self {
        Self {
            headers: ["Date", "Forecast", "Lower Bound", "Upper Bound"]
                .iter()
                .map(|h| h.to_string())
                .collect(),
            rows: records
                .iter()
                .map(|r| {
                    vec![
                        r.date.to_string(),
                        format!("{:.2}", r.forecast),
                        format!("{:.2}", r.lower),
                        format!("{:.2}", r.upper),
                    ]
                })
                .collect(),
        }
    }
}

/// Content shown below the forms
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub predictions: Option<Table>,
    pub forecast: Option<Table>,
    /// `(title, data URI)` pairs
    pub charts: Vec<(String, String)>,
}

impl Page {
    pub fn with_predictions(mut self, table: Table) -> Self {
        self.predictions = Some(table);
        self
    }

    pub fn with_forecast(mut self, table: Table) -> Self {
        self.forecast = Some(table);
        self
    }

    pub fn with_chart(mut self, title: &str, data_uri: String) -> Self {
        self.charts.push((title.to_string(), data_uri));
        self
    }

    pub fn render(&self) -> String {
        let mut html = String::with_capacity(4096);
        html.push_str(HEAD);
        html.push_str("<h1>Sales Prediction</h1>\n");
        html.push_str(UPLOAD_FORM);
        manual_form(&mut html);
        html.push_str(
            "<section><h2>Forecast</h2><a href=\"/forecast\">Forecast the next 12 weeks</a></section>\n",
        );

        if let Some(table) = &self.predictions {
            write_table(&mut html, "Predictions", table);
        }
        if let Some(table) = &self.forecast {
            write_table(&mut html, "Forecast", table);
        }
        for (title, uri) in &self.charts {
            let _ = writeln!(
                html,
                "<figure><img alt=\"{0}\" src=\"{1}\"><figcaption>{0}</figcaption></figure>",
                escape(title),
                escape(uri)
            );
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

const HEAD: &str = "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<title>Sales Prediction</title>
<style>
body { font-family: sans-serif; margin: 2em; }
table { border-collapse: collapse; margin-top: 1em; }
th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: right; }
label { display: inline-block; min-width: 9em; }
figure { margin: 1em 0; }
</style>
</head>
<body>
";

const UPLOAD_FORM: &str = "<section><h2>Upload CSV</h2>
<form action=\"/predict_csv\" method=\"post\" enctype=\"multipart/form-data\">
<input type=\"file\" name=\"file\" accept=\".csv\">
<label><input type=\"checkbox\" name=\"include_forecast\" value=\"on\"> include forecast</label>
<button type=\"submit\">Predict</button>
</form></section>
";

fn manual_form(html: &mut String) {
    html.push_str("<section><h2>Manual Entry</h2>\n<form action=\"/predict_manual\" method=\"post\">\n");
    for (name, default) in NUMERIC_INPUTS {
        let _ = writeln!(
            html,
            "<div><label for=\"{name}\">{name}</label><input id=\"{name}\" name=\"{name}\" type=\"number\" step=\"any\" value=\"{default}\"></div>"
        );
    }
    for (name, options) in CATEGORY_INPUTS {
        let _ = write!(
            html,
            "<div><label for=\"{name}\">{name}</label><select id=\"{name}\" name=\"{name}\">"
        );
        for option in options {
            let _ = write!(html, "<option>{option}</option>");
        }
        html.push_str("</select></div>\n");
    }
    html.push_str("<button type=\"submit\">Predict</button>\n</form></section>\n");
}

fn write_table(html: &mut String, title: &str, table: &Table) {
    let _ = writeln!(html, "<section><h2>{}</h2>\n<table>\n<tr>", escape(title));
    for header in &table.headers {
        let _ = write!(html, "<th>{}</th>", escape(header));
    }
    html.push_str("</tr>\n");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape(cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table></section>\n");
}

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
