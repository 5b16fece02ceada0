use std::thread;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use sure_core::Totals;

use crate::{config::Config, io};

fn sum_task(
    cfg: &Config,
    ix: usize,
    recv: Receiver<usize>,
    snd: Sender<(usize, Vec<u64>)>,
) -> anyhow::Result<()> {
    debug!("Summing task {} starting up", ix);
    while let Ok(i) = recv.recv() {
        let p = &cfg.input_files()[i];
        debug!("Task {} loading {}", ix, p.display());
        let sums = io::sum_count_file(p, cfg.columns())?;
        snd.send((i, sums))?;
    }
    debug!("Summing task {} closing down", ix);
    Ok(())
}

/// Strategy
///
/// Input files are handed out to a pool of summing tasks.  Each task returns
/// the column sums for one complete file, and these are added to the totals
/// in whatever order they arrive (integer addition is order independent).
pub fn aggregate_totals(cfg: &Config) -> anyhow::Result<Totals> {
    info!("Calculating total counts - START");
    let mut totals = Totals::zeroed(cfg.columns(), cfg.ipcr_column())?;
    let n_files = cfg.input_files().len();
    let nt = cfg.threads().min(n_files).max(1);
    debug!("Using {} summing tasks for {} files", nt, n_files);

    thread::scope(|sc| {
        // Channel to hand out file indices
        let (send_job, recv_job) = bounded(nt * 2);
        // Channel for results
        let (send_res, recv_res) = unbounded();

        let join_handles: Vec<_> = (0..nt)
            .map(|ix| {
                let r = recv_job.clone();
                let s = send_res.clone();
                sc.spawn(move || sum_task(cfg, ix + 1, r, s))
            })
            .collect();
        drop(recv_job);
        drop(send_res);

        // Sending only fails if every task has already exited (with an error)
        for i in 0..n_files {
            if send_job.send(i).is_err() {
                break;
            }
        }
        drop(send_job);

        for (i, sums) in recv_res.iter() {
            trace!("Adding totals from {}", cfg.input_files()[i].display());
            totals.accumulate(&sums)?;
        }

        for jh in join_handles {
            jh.join()
                .map_err(|_| anyhow!("Error joining summing task"))??;
        }
        Ok::<(), anyhow::Error>(())
    })?;

    for (c, t) in totals.entries() {
        debug!("Total for {}: {}", c, t)
    }
    info!("Calculating total counts - DONE");
    Ok(totals)
}
