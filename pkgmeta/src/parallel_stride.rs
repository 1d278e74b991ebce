use std::sync::Mutex;

/// Runs `run` over owned `items` on at most `concurrency` scoped threads.
/// Worker `w` takes items `w, w + workers, ...`; results keep input order.
/// The first error stops every worker before its next item.
pub fn run_parallel_stride<T, R, E, F>(
    items: Vec<T>,
    concurrency: usize,
    run: F,
) -> Result<Vec<R>, E>
where
    T: Send,
    R: Send,
    E: Send,
    F: Fn(T, usize) -> Result<R, E> + Sync,
{
    let total = items.len();
    if total == 0 {
        return Ok(vec![]);
    }
    let worker_count = concurrency.clamp(1, total);

    let pending: Vec<Mutex<Option<T>>> = items
        .into_iter()
        .map(|item| Mutex::new(Some(item)))
        .collect();
    let results_by_index: Vec<Mutex<Option<R>>> = (0..total).map(|_| Mutex::new(None)).collect();
    let first_error: Mutex<Option<E>> = Mutex::new(None);

    std::thread::scope(|scope| {
        for start_index in 0..worker_count {
            let (run, pending, results_by_index, first_error) =
                (&run, &pending, &results_by_index, &first_error);
            scope.spawn(move || {
                let mut index = start_index;
                while index < total {
                    if first_error.lock().ok().is_some_and(|g| g.is_some()) {
                        return;
                    }
                    let Some(item) = pending[index].lock().ok().and_then(|mut g| g.take()) else {
                        return;
                    };
                    match run(item, index) {
                        Ok(value) => {
                            if let Ok(mut slot) = results_by_index[index].lock() {
                                *slot = Some(value);
                            }
                        }
                        Err(err) => {
                            if let Ok(mut slot) = first_error.lock()
                                && slot.is_none()
                            {
                                *slot = Some(err);
                            };
                            return;
                        }
                    }
                    index += worker_count;
                }
            });
        }
    });

    if let Some(err) = first_error.into_inner().ok().flatten() {
        return Err(err);
    }
    Ok(results_by_index
        .into_iter()
        .filter_map(|slot| slot.into_inner().ok().flatten())
        .collect())
}
