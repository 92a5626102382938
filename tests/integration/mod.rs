// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod helpers;

mod app_test;
mod capcut_api_test;
mod ytsearch_api_test;
