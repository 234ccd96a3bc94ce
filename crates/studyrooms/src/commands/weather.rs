//! Weather at the campus (or given coordinates).

use studyrooms_core::{Portal, Weather, WeatherQuery};

use crate::cli::{GlobalOpts, WeatherArgs};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(w: &Weather) -> String {
    let mut lines = vec![
        format!("Temperature:   {:.1} °C", w.temperature_celsius),
        format!("Wind:          {:.1} km/h", w.wind_speed),
        format!("Precipitation: {:.1} mm", w.precipitation),
    ];
    if let Some(code) = w.weather_code {
        lines.push(format!("Code:          {code}"));
    }
    if let Some(at) = w.timestamp {
        lines.push(format!("At:            {}", at.format("%Y-%m-%d %H:%M")));
    }
    lines.join("\n")
}

pub async fn handle(portal: &Portal, args: WeatherArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let query = WeatherQuery {
        latitude: args.lat,
        longitude: args.lon,
        at: args
            .at
            .as_deref()
            .map(|raw| util::parse_datetime("at", raw))
            .transpose()?,
    };

    let weather = portal.weather(&query).await?;
    let out = output::render_single(&global.output, &weather, detail, |w| {
        format!("{:.1}", w.temperature_celsius)
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
