use domain::chart::RankedSong;
use std::fmt::Write;

/// 生成人类可读的榜单明细：名次、标题、艺术家、分数以及各平台名次
pub fn render_chart_report(chart: &[RankedSong]) -> String {
    let mut report = String::new();
    for ranked in chart {
        let song = &ranked.song;
        let _ = writeln!(
            report,
            "{}. {} - {}",
            ranked.rank, song.canonical_title, song.canonical_artist
        );
        let _ = writeln!(
            report,
            "   Score: {:.3} | Platforms: {}",
            song.score, song.platforms_count
        );

        let mut platforms: Vec<_> = song.platform_ranks.iter().collect();
        platforms.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.platform.cmp(&b.platform)));
        let details: Vec<String> = platforms
            .iter()
            .map(|p| format!("{}: #{} (weight {:.1})", p.platform, p.rank, p.weight))
            .collect();
        let _ = writeln!(report, "   {}", details.join(", "));
    }
    report
}
