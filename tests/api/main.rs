mod health_check;
mod onboard;
