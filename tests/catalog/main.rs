mod companies;
