//! HTML rendering of NAV charts
//!
//! Produces a standalone page that draws a [`NavChart`] with ECharts in the
//! browser. Chart options are serialized to JSON and embedded in an inline
//! script.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use domain_fund::NavChart;

const ECHARTS_JS: &str = "https://go-echarts.github.io/go-echarts-assets/assets/echarts.min.js";
const THEME_JS: &str = "https://go-echarts.github.io/go-echarts-assets/assets/themes/westeros.js";
const THEME: &str = "westeros";

/// ECharts option object for a chart
pub fn chart_options(chart: &NavChart) -> Value {
    let mut y_axis = json!({ "type": "value" });
    if let Some(bounds) = chart.y_axis {
        y_axis["min"] = number(bounds.min);
        y_axis["max"] = number(bounds.max);
    }

    json!({
        "title": { "text": chart.title, "subtext": chart.subtitle },
        "tooltip": {
            "show": true,
            "trigger": "item",
            "axisPointer": { "type": "cross", "snap": true }
        },
        "legend": { "show": true },
        "xAxis": { "type": "category", "data": chart.labels },
        "yAxis": y_axis,
        "series": [{
            "name": chart.series_name,
            "type": "line",
            "smooth": true,
            "data": chart.values.iter().map(|v| number(*v)).collect::<Vec<_>>()
        }]
    })
}

/// Renders the full HTML page
pub fn render_page(chart: &NavChart) -> String {
    // "</" inside the JSON would close the script element early
    let options = chart_options(chart).to_string().replace("</", "<\\/");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{echarts}"></script>
<script src="{theme_js}"></script>
</head>
<body>
<div class="container">
<div id="nav-chart" style="width:900px;height:500px;"></div>
</div>
<script>
"use strict";
let navChart = echarts.init(document.getElementById("nav-chart"), "{theme}");
navChart.setOption({options});
</script>
</body>
</html>
"#,
        title = escape_html(&chart.title),
        echarts = ECHARTS_JS,
        theme_js = THEME_JS,
        theme = THEME,
        options = options,
    )
}

fn number(value: Decimal) -> Value {
    value.to_f64().map_or(Value::Null, |f| json!(f))
}

fn escape_html(text: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::FundCode;
    use domain_fund::NavRecord;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn chart(annotation: Option<&str>) -> NavChart {
        let code = FundCode::parse("000962").unwrap();
        let records = vec![
            NavRecord::new(code.clone(), NaiveDate::from_ymd_opt(2022, 4, 11).unwrap(), dec!(1.234), dec!(1.5), "sina"),
            NavRecord::new(code.clone(), NaiveDate::from_ymd_opt(2022, 4, 13).unwrap(), dec!(1.25), dec!(1.516), "sina"),
        ];
        NavChart::new(&code, &records, annotation)
    }

    #[test]
    fn test_options_carry_series_and_bounds() {
        let options = chart_options(&chart(None));

        assert_eq!(options["title"]["text"], "Fund NAV trend (000962)");
        assert_eq!(options["title"]["subtext"], "000962");
        assert_eq!(options["xAxis"]["data"][1], "2022-04-13");
        assert_eq!(options["series"][0]["data"][0], 1.234);
        assert_eq!(options["series"][0]["smooth"], true);
        assert_eq!(options["yAxis"]["min"], 1.0);
        assert_eq!(options["yAxis"]["max"], 1.5);
        assert_eq!(options["tooltip"]["axisPointer"]["type"], "cross");
    }

    #[test]
    fn test_empty_chart_has_no_axis_bounds() {
        let code = FundCode::parse("000962").unwrap();
        let options = chart_options(&NavChart::new(&code, &[], None));

        assert!(options["yAxis"].get("min").is_none());
        assert_eq!(options["series"][0]["data"], json!([]));
    }

    #[test]
    fn test_page_embeds_options() {
        let html = render_page(&chart(Some("Total invested: 1000")));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Fund NAV trend (000962)</title>"));
        assert!(html.contains("\"subtext\":\"Total invested: 1000\""));
        assert!(html.contains("westeros"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
    }

    proptest! {
        #[test]
        fn test_annotation_cannot_close_script(annotation in ".{0,40}") {
            let html = render_page(&chart(Some(&format!("{}</script><script>", annotation))));
            prop_assert_eq!(html.matches("</script>").count(), 3);
        }
    }
}
