//! MongoDB devops queries as aggregation pipelines over the point documents
//! written by the `mongo` format.

use super::{
    cpu_metrics, duration_label, hosts_label, random_hosts, DevopsCommon, DevopsHighCpu,
    DevopsSingleGroupby, HIGH_CPU_THRESHOLD, HIGH_CPU_WINDOW_HOURS,
};
use crate::{DatabaseConfig, QueryGenError};
use bench_core::{Query, QueryPool, TimeInterval};
use bson::{doc, Document};
use chrono::Duration;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write as _;

/// Collection holding the loaded point documents.
pub const POINT_COLLECTION: &str = "point_data";

const MINUTE_NANOS: i64 = 60_000_000_000;

#[derive(Debug, Default, Clone, Serialize)]
pub struct MongoQuery {
    pub human_label: String,
    pub human_description: String,
    pub database_name: String,
    pub collection_name: String,
    pub pipeline: Vec<Document>,
}

impl Query for MongoQuery {
    fn human_label(&self) -> &str {
        &self.human_label
    }

    fn human_description(&self) -> &str {
        &self.human_description
    }

    fn reset(&mut self) {
        self.human_label.clear();
        self.human_description.clear();
        self.database_name.clear();
        self.collection_name.clear();
        self.pipeline.clear();
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

#[derive(Debug)]
pub struct MongoDevops {
    database_name: String,
    all_interval: TimeInterval,
    rng: StdRng,
    pool: QueryPool<MongoQuery>,
}

pub type MongoDevopsHighCpu = DevopsHighCpu<MongoDevops>;
pub type MongoDevopsSingleGroupby = DevopsSingleGroupby<MongoDevops>;

fn time_match(window: &TimeInterval) -> Document {
    doc! {
        "measurement": "cpu",
        "timestamp_ns": {
            "$gte": window.start_unix_nanos(),
            "$lt": window.end_unix_nanos(),
        },
    }
}

impl DevopsCommon for MongoDevops {
    type Query = MongoQuery;

    fn new(db: &DatabaseConfig, interval: TimeInterval) -> Self {
        Self {
            database_name: db.database_name.clone(),
            all_interval: interval,
            rng: StdRng::seed_from_u64(db.seed),
            pool: QueryPool::default(),
        }
    }

    fn pool(&mut self) -> &mut QueryPool<MongoQuery> {
        &mut self.pool
    }

    fn high_cpu_for_hosts(
        &mut self,
        q: &mut MongoQuery,
        scale_var: usize,
        nhosts: usize,
    ) -> Result<(), QueryGenError> {
        let window = self
            .all_interval
            .rand_window(Duration::hours(HIGH_CPU_WINDOW_HOURS), &mut self.rng)?;

        let mut matcher = time_match(&window);
        matcher.insert("fields.usage_user", doc! { "$gt": HIGH_CPU_THRESHOLD });
        if nhosts > 0 {
            let hosts = random_hosts(&mut self.rng, scale_var, nhosts)?;
            matcher.insert("tags.hostname", doc! { "$in": hosts });
        }

        write!(q.human_label, "Mongo CPU over threshold, {}", hosts_label(nhosts))?;
        write!(q.human_description, "{}: {}", q.human_label, window.start_string())?;
        q.database_name.push_str(&self.database_name);
        q.collection_name.push_str(POINT_COLLECTION);
        q.pipeline.push(doc! { "$match": matcher });
        Ok(())
    }

    fn group_by_time(
        &mut self,
        q: &mut MongoQuery,
        scale_var: usize,
        nhosts: usize,
        nmetrics: usize,
        hours: i64,
    ) -> Result<(), QueryGenError> {
        let window_len = Duration::hours(hours);
        let window = self.all_interval.rand_window(window_len, &mut self.rng)?;
        let hosts = random_hosts(&mut self.rng, scale_var, nhosts)?;
        let metrics = cpu_metrics(nmetrics);

        let mut matcher = time_match(&window);
        matcher.insert("tags.hostname", doc! { "$in": hosts });

        let mut group = doc! {
            "_id": {
                "$subtract": [
                    "$timestamp_ns",
                    { "$mod": ["$timestamp_ns", MINUTE_NANOS] },
                ],
            },
        };
        for m in metrics {
            group.insert(format!("max_{m}"), doc! { "$max": format!("$fields.{m}") });
        }

        write!(
            q.human_label,
            "Mongo {} cpu metric(s), random {} hosts, random {} by 1m",
            metrics.len(),
            nhosts,
            duration_label(window_len)
        )?;
        write!(q.human_description, "{}: {}", q.human_label, window.start_string())?;
        q.database_name.push_str(&self.database_name);
        q.collection_name.push_str(POINT_COLLECTION);
        q.pipeline.extend([
            doc! { "$match": matcher },
            doc! { "$group": group },
            doc! { "$sort": { "_id": 1 } },
        ]);
        Ok(())
    }
}
