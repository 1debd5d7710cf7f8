use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::pipeline::downsample::PlotSeries;
use crate::report::format_f64_6;

pub const TABLE_HEADER: [&str; 4] = ["time_s", "route_completion", "penalty", "driving_score"];

pub fn write_series_tsv(plot: &PlotSeries, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "{}", TABLE_HEADER.join("\t"))?;
    for i in 0..plot.len() {
        let row = [
            format_f64_6(plot.time_s[i]),
            format_f64_6(plot.route_completion[i]),
            format_f64_6(plot.penalty[i]),
            format_f64_6(plot.driving_score[i]),
        ]
        .join("\t");
        writeln!(w, "{}", row)?;
    }
    w.flush()
}
