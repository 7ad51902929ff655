use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use quotebook_core::errors::Result;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A job runs against the writer's dedicated connection and returns a core Result.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type BoxedResult = Box<dyn Any + Send + 'static>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(Job<BoxedResult>, oneshot::Sender<Result<BoxedResult>>)>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection,
    /// inside an immediate transaction.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as BoxedResult)),
                ret_tx,
            ))
            .await
            .map_err(|_| StorageError::WriterUnavailable("writer actor has stopped".into()))?;

        let boxed = ret_rx.await.map_err(|_| {
            StorageError::WriterUnavailable("writer actor dropped the reply".into())
        })??;

        boxed.downcast::<T>().map(|v| *v).map_err(|_| {
            StorageError::WriterUnavailable("unexpected writer result type".into()).into()
        })
    }
}

/// Spawns a background Tokio task that acts as the single writer to the
/// database. The actor owns one pooled connection and processes jobs serially.
pub fn spawn_writer(pool: &DbPool) -> Result<WriteHandle> {
    let mut conn = pool.get().map_err(StorageError::from)?;
    let (tx, mut rx) =
        mpsc::channel::<(Job<BoxedResult>, oneshot::Sender<Result<BoxedResult>>)>(1024);

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<BoxedResult> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    job(c).map_err(StorageError::from)
                })
                .map_err(|e: StorageError| e.into());

            // The requester may have gone away; nothing to do then.
            let _ = reply_tx.send(result);
        }
        log::debug!("Writer actor stopped: all handles dropped");
    });

    Ok(WriteHandle { tx })
}
