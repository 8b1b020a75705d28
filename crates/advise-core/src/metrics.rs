//! Health-metric snapshot handed to prompt assembly.
//!
//! Field names mirror the upstream device-export JSON (camelCase). Every
//! metric is optional; only present metrics contribute prompt lines.

use serde::{Deserialize, Serialize};

/// A day's worth of biometric readings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthSnapshot {
    pub steps: Option<u32>,
    pub sleep: Option<SleepDuration>,
    pub heart_rate: Option<u32>,
    pub active_energy: Option<f64>,
    pub resting_energy: Option<f64>,
    /// Distance covered today, in kilometers.
    pub distance: Option<f64>,
    /// Blood oxygen saturation, percent.
    pub blood_oxygen: Option<f64>,
    /// Body fat, percent.
    pub body_fat: Option<f64>,
    pub flights_climbed: Option<u32>,
    /// Body weight, kilograms.
    pub weight: Option<f64>,
    pub blood_pressure: Option<BloodPressure>,
    /// mmol/L.
    pub blood_sugar: Option<f64>,
    /// mg/dL.
    pub blood_lipids: Option<f64>,
    /// umol/L.
    pub uric_acid: Option<f64>,
    pub bmi: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepDuration {
    pub hours: u32,
    pub minutes: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: f64,
    pub diastolic: f64,
}

impl HealthSnapshot {
    /// Renders one prompt line per present metric, in a fixed order.
    pub fn metric_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(steps) = self.steps {
            lines.push(format!("今日步数: {steps}步 (当日数据)"));
        }
        if let Some(sleep) = self.sleep {
            lines.push(format!(
                "最近睡眠时长: {}小时{}分钟",
                sleep.hours, sleep.minutes
            ));
        }
        if let Some(heart_rate) = self.heart_rate {
            lines.push(format!("最近心率: {heart_rate}次/分钟 (当日数据)"));
        }
        if let Some(active_energy) = self.active_energy {
            lines.push(format!("今日活动消耗: {active_energy}千卡 (当日数据)"));
        }
        if let Some(resting_energy) = self.resting_energy {
            lines.push(format!("今日静息消耗: {resting_energy}千卡 (当日数据)"));
        }
        if let Some(distance) = self.distance {
            lines.push(format!("今日运动距离: {distance}公里 (当日数据)"));
        }
        if let Some(blood_oxygen) = self.blood_oxygen {
            lines.push(format!("血氧饱和度: {blood_oxygen}% (当日数据)"));
        }
        if let Some(body_fat) = self.body_fat {
            lines.push(format!("体脂率: {body_fat}%"));
        }
        if let Some(flights) = self.flights_climbed {
            lines.push(format!("今日爬楼: {flights} 层 (当日数据)"));
        }
        if let Some(weight) = self.weight {
            lines.push(format!("今日体重: {weight} 公斤 (当日数据)"));
        }
        if let Some(bp) = self.blood_pressure {
            lines.push(format!(
                "今日血压: {}/{} mmHg (当日数据)",
                bp.systolic as i64, bp.diastolic as i64
            ));
        }
        if let Some(blood_sugar) = self.blood_sugar {
            lines.push(format!("今日血糖: {blood_sugar} mmol/L (当日数据)"));
        }
        if let Some(blood_lipids) = self.blood_lipids {
            lines.push(format!("今日血脂: {blood_lipids} mg/dL"));
        }
        if let Some(uric_acid) = self.uric_acid {
            lines.push(format!("今日尿酸: {uric_acid} umol/L"));
        }
        if let Some(bmi) = self.bmi {
            lines.push(format!("最近BMI: {bmi:.1}"));
        }

        lines
    }

    pub fn is_empty(&self) -> bool {
        self.metric_lines().is_empty()
    }
}

/// Who the advice is for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserContext {
    pub age: Option<u32>,
    pub gender: Option<String>,
    /// Free-form self description entered by the user.
    pub description: Option<String>,
}

impl UserContext {
    /// Renders the demographic prompt lines (age and gender only; the
    /// self-description is placed separately by the template).
    pub fn demographic_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(age) = self.age {
            lines.push(format!("用户年龄: {age} 岁"));
        }
        if let Some(gender) = &self.gender {
            lines.push(format!("用户性别: {gender}"));
        }
        lines
    }
}
