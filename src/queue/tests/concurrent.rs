//! Tests for concurrent producer/consumer correctness

#[cfg(test)]
mod tests {
    use crate::queue::tests::store_lines;
    use crate::queue::{Consumer, Message, MessageQueue, Producer, QueueConfig};
    use std::collections::HashSet;
    use std::sync::Arc;
    use tokio::task::JoinSet;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_producers_then_consumers_drain_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.log");
        let queue = MessageQueue::create(QueueConfig::new(&path).with_batch_size(16))
            .await
            .unwrap();

        let producer_count = 4;
        let messages_per_producer = 250;

        let mut producers = JoinSet::new();
        for producer_id in 0..producer_count {
            let handle = Producer::new(queue.clone());
            producers.spawn(async move {
                for i in 0..messages_per_producer {
                    handle.produce_text(format!("producer-{producer_id}-message-{i}"));
                }
            });
        }
        while let Some(result) = producers.join_next().await {
            result.unwrap();
        }

        let total = producer_count * messages_per_producer;
        assert_eq!(queue.size(), total);

        let consumer_count = 3;
        let mut consumers = JoinSet::new();
        for _ in 0..consumer_count {
            let handle = Consumer::new(queue.clone());
            consumers.spawn(async move {
                let mut seen = Vec::new();
                while let Some(message) = handle.poll() {
                    seen.push(message.text().into_owned());
                }
                seen
            });
        }

        let mut consumed = Vec::new();
        while let Some(result) = consumers.join_next().await {
            consumed.extend(result.unwrap());
        }

        assert_eq!(consumed.len(), total);
        assert_eq!(queue.size(), 0);
        assert!(queue.dequeue().is_none());

        // Every message was delivered to exactly one consumer.
        let unique: HashSet<&String> = consumed.iter().collect();
        assert_eq!(unique.len(), total);

        queue.shutdown().await;
        assert_eq!(store_lines(&path).len(), total);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_interleaved_concurrent_enqueue_dequeue() {
        let dir = tempfile::tempdir().unwrap();
        let queue = MessageQueue::create(
            QueueConfig::new(dir.path().join("messages.log")).with_batch_size(32),
        )
        .await
        .unwrap();

        let total = 500usize;
        let producer_queue = Arc::clone(&queue);
        let producer = tokio::spawn(async move {
            for i in 0..total {
                producer_queue.enqueue(Message::from_text(format!("{i}")));
                if i % 64 == 0 {
                    tokio::task::yield_now().await;
                }
            }
        });

        let consumer_queue = Arc::clone(&queue);
        let consumer = tokio::spawn(async move {
            let mut previous: Option<usize> = None;
            let mut count = 0usize;
            while count < total {
                match consumer_queue.dequeue() {
                    Some(message) => {
                        let value: usize = message.text().parse().unwrap();
                        // A single consumer observes strictly increasing
                        // values from a single producer.
                        if let Some(prev) = previous {
                            assert!(value > prev, "order violated: {value} after {prev}");
                        }
                        previous = Some(value);
                        count += 1;
                    }
                    None => tokio::task::yield_now().await,
                }
            }
            count
        });

        producer.await.unwrap();
        assert_eq!(consumer.await.unwrap(), total);
        assert_eq!(queue.size(), 0);

        queue.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_size_is_bounded_by_enqueues_under_concurrency() {
        let dir = tempfile::tempdir().unwrap();
        let queue = MessageQueue::create(QueueConfig::new(dir.path().join("messages.log")))
            .await
            .unwrap();

        let total = 200usize;
        let writer_queue = Arc::clone(&queue);
        let writer = tokio::spawn(async move {
            for i in 0..total {
                writer_queue.enqueue(Message::from_text(format!("{i}")));
            }
        });

        // size() must never exceed what has been enqueued so far.
        for _ in 0..50 {
            assert!(queue.size() <= total);
            tokio::task::yield_now().await;
        }

        writer.await.unwrap();
        assert_eq!(queue.size(), total);

        queue.shutdown().await;
    }
}
