use crate::stats::SimulationSummary;
use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::sync::mpsc::Receiver;

const WIDTH: usize = 80;

fn format_summary(summary: &SimulationSummary) -> String {
    let title = format!("player #{}", summary.seat + 1);
    format!("{:-^WIDTH$}\n{}{}\n", title, summary, "-".repeat(WIDTH))
}

/// Writes one block per summary, in the order given.
pub fn write_report<'a, I>(summaries: I, mut writer: impl Write) -> std::io::Result<()>
where
    I: IntoIterator<Item = &'a SimulationSummary>,
{
    for summary in summaries {
        writer.write_all(format_summary(summary).as_bytes())?;
    }
    writer.flush()
}

/// Collects the summaries sent by simulation runs and writes them, merged per seat, once every
/// run in `ids` has reported that it is finished.
///
/// Each message carries the id of the run that sent it. `Some` holds the summaries of that run,
/// `None` marks the run as finished. If every sender hangs up early whatever was received is
/// written anyway.
pub fn write_summaries(
    receiver: Receiver<(Option<Vec<SimulationSummary>>, usize)>,
    mut ids: HashSet<usize>,
    writer: impl Write,
) -> std::io::Result<()> {
    let mut summaries: BTreeMap<usize, SimulationSummary> = BTreeMap::new();
    while !ids.is_empty() {
        let Ok((run_summaries, id)) = receiver.recv() else {
            log::warn!("{} simulations never finished", ids.len());
            break;
        };
        match run_summaries {
            Some(run_summaries) => {
                for cur in run_summaries {
                    match summaries.get_mut(&cur.seat) {
                        Some(summary) => summary.merge(&cur),
                        None => {
                            summaries.insert(cur.seat, cur);
                        }
                    }
                }
            }
            None => {
                ids.remove(&id);
            }
        }
    }
    write_report(summaries.values(), writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    fn summary(seat: usize, wins: i32) -> SimulationSummary {
        SimulationSummary {
            seat,
            runs: 1,
            rounds: 1,
            wins,
            ..Default::default()
        }
    }

    #[test]
    fn test_merges_per_seat() {
        let (sender, receiver) = channel();
        sender
            .send((Some(vec![summary(0, 1), summary(1, 2)]), 1))
            .unwrap();
        sender.send((None, 1)).unwrap();
        sender
            .send((Some(vec![summary(0, 3), summary(1, 4)]), 2))
            .unwrap();
        sender.send((None, 2)).unwrap();

        let mut out = Vec::new();
        write_summaries(receiver, HashSet::from([1, 2]), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let first = text.find("player #1").unwrap();
        let second = text.find("player #2").unwrap();
        assert!(first < second);
        assert_eq!(text.matches("simulations run").count(), 2);
    }

    #[test]
    fn test_stops_when_senders_hang_up() {
        let (sender, receiver) = channel();
        sender.send((Some(vec![summary(0, 1)]), 1)).unwrap();
        drop(sender);
        let mut out = Vec::new();
        write_summaries(receiver, HashSet::from([1, 2]), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("player #1"));
    }
}
